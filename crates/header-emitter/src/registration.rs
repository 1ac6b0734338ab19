//! Append-only registration lists shared across runs.
//!
//! Two side files collect one line per converted image: an include list
//! (`#include "Img_x_png.h"`) and a record list suitable for an array
//! initializer of
//!
//! ```c
//! struct tag_ImageData {
//!     uint8_t w;
//!     uint8_t h;
//!     uint8_t fl;
//!     const unsigned char * data;
//!     const char * filename;
//! };
//! ```
//!
//! Lines are appended in invocation order. The two lists are updated
//! independently; there is no atomicity across the pair.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::naming::Symbols;
use crate::{EmitError, Result};

/// Destination for registration lines.
pub trait RegistrationSink {
    /// Human-readable location used in logs.
    fn describe(&self) -> String;

    /// Append one complete line (including its newline).
    fn append_line(&mut self, line: &str) -> Result<()>;
}

/// Appends to a file, creating it on first use.
#[derive(Debug, Clone)]
pub struct AppendFileSink {
    path: PathBuf,
}

impl AppendFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistrationSink for AppendFileSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn append_line(&mut self, line: &str) -> Result<()> {
        let write_err = |source| EmitError::Write {
            path: self.path.display().to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.write_all(line.as_bytes()).map_err(write_err)
    }
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl RegistrationSink for MemorySink {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn append_line(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// `#include` line for the generated header.
pub fn include_line(symbols: &Symbols) -> String {
    format!("#include \"{}\"\n", symbols.header_file)
}

/// Brace-delimited image record `{w, h, flags, data, filename},`.
pub fn struct_line(symbols: &Symbols) -> String {
    format!(
        "{{{}, {}, {}, {}, {}}},\n",
        symbols.width(),
        symbols.height(),
        symbols.flags(),
        symbols.data(),
        symbols.filename()
    )
}

/// The configured side files for one run.
#[derive(Default)]
pub struct Registrar {
    pub include_list: Option<Box<dyn RegistrationSink>>,
    pub struct_list: Option<Box<dyn RegistrationSink>>,
}

impl Registrar {
    pub fn new(
        include_list: Option<Box<dyn RegistrationSink>>,
        struct_list: Option<Box<dyn RegistrationSink>>,
    ) -> Self {
        Self {
            include_list,
            struct_list,
        }
    }

    /// Append this image to every configured list, include list first.
    ///
    /// Call only after the header has been written.
    pub fn register(&mut self, symbols: &Symbols) -> Result<()> {
        if let Some(sink) = self.include_list.as_mut() {
            sink.append_line(&include_line(symbols))?;
            debug!(list = %sink.describe(), "Appended include line");
        }
        if let Some(sink) = self.struct_list.as_mut() {
            sink.append_line(&struct_line(symbols))?;
            debug!(list = %sink.describe(), "Appended struct record");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(name: &str) -> Symbols {
        Symbols::from_source(Path::new(name)).unwrap()
    }

    #[test]
    fn test_include_line() {
        assert_eq!(include_line(&symbols("a-b.png")), "#include \"Img_a-b_png.h\"\n");
    }

    #[test]
    fn test_struct_line() {
        assert_eq!(
            struct_line(&symbols("a-b.png")),
            "{IMG_a_b_W, IMG_a_b_H, IMG_a_b_FLAGS, IMG_a_b_Data, IMG_a_b_FILENAME},\n"
        );
    }

    #[test]
    fn test_file_sink_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inc_imgs.h");
        std::fs::write(&path, "// existing\n").unwrap();

        let mut sink = AppendFileSink::new(&path);
        sink.append_line(&include_line(&symbols("one.png"))).unwrap();
        sink.append_line(&include_line(&symbols("two.png"))).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "// existing\n#include \"Img_one_png.h\"\n#include \"Img_two_png.h\"\n"
        );
    }

    #[test]
    fn test_file_sink_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inc_struct.h");
        AppendFileSink::new(&path)
            .append_line(&struct_line(&symbols("x.bmp")))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_registrar_skips_unconfigured_lists() {
        let mut registrar = Registrar::default();
        assert!(registrar.register(&symbols("x.png")).is_ok());
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::default();
        sink.append_line("a\n").unwrap();
        sink.append_line("b\n").unwrap();
        assert_eq!(sink.lines, vec!["a\n", "b\n"]);
    }
}
