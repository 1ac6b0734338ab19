//! Header rendering and writing.
//!
//! The header is built completely in memory and written with a single call,
//! so a failed run never leaves a truncated file behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::naming::Symbols;
use crate::{EmitError, Result};

/// Default number of byte literals per line in the data array.
pub const DEFAULT_ITEMS_PER_ROW: usize = 8;

/// Layout options for the generated header.
#[derive(Debug, Clone)]
pub struct HeaderOptions {
    /// Byte literals per line; every line ends with the index of its first item.
    pub items_per_row: usize,

    /// Emit the comment block when comments are present.
    pub include_comments: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            items_per_row: DEFAULT_ITEMS_PER_ROW,
            include_comments: true,
        }
    }
}

impl HeaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set items per row.
    pub fn with_items_per_row(mut self, val: usize) -> Self {
        self.items_per_row = val;
        self
    }

    /// Builder: set comment flag.
    pub fn with_comments(mut self, val: bool) -> Self {
        self.include_comments = val;
        self
    }
}

/// Everything the header describes about one converted image.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    pub symbols: Symbols,
    pub width: u32,
    pub height: u32,
    /// Reserved, currently always 0.
    pub flags: u8,
    pub data: Vec<u8>,
    /// Free text placed in a `/* */` block; skipped when empty.
    pub comments: String,
}

impl ImageArtifact {
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

fn render_data(out: &mut String, data: &[u8], items_per_row: usize) {
    for (row, chunk) in data.chunks(items_per_row).enumerate() {
        out.push('\t');
        for byte in chunk {
            out.push_str(&format!("{byte:#x}, "));
        }
        out.push_str(&format!("//{}\n", row * items_per_row));
    }
}

/// Render the full header text.
pub fn render_header(artifact: &ImageArtifact, opts: &HeaderOptions) -> Result<String> {
    if opts.items_per_row == 0 {
        return Err(EmitError::InvalidItemsPerRow);
    }
    let s = &artifact.symbols;
    let base = &s.base;
    let mut out = String::new();

    out.push_str(&format!("#ifndef {base}\n#define {base}\n\n\n"));
    out.push_str(&format!("#define {}\t{}\n", s.width(), artifact.width));
    out.push_str(&format!("#define {}\t{}\n", s.height(), artifact.height));
    out.push_str(&format!("#define {}\t{}\n", s.flags(), artifact.flags));
    out.push_str(&format!("#define {}\t\"{}\"\n", s.filename(), s.stem));
    out.push_str(&format!("#define {}\t{}\n", s.data_len(), artifact.data_len()));

    if opts.include_comments && !artifact.comments.is_empty() {
        out.push_str(&format!("/*\n{}*/\n\n", artifact.comments));
    }

    out.push_str(&format!("static const unsigned char {}[] = {{ \n", s.data()));
    render_data(&mut out, &artifact.data, opts.items_per_row);
    out.push_str(&format!("}};// {base}_Data[]\n\n\n"));
    out.push_str(&format!("#endif //{base}\n"));

    Ok(out)
}

/// Render and write the header into `dir`, returning its path.
pub fn write_header(dir: &Path, artifact: &ImageArtifact, opts: &HeaderOptions) -> Result<PathBuf> {
    let text = render_header(artifact, opts)?;
    let path = dir.join(&artifact.symbols.header_file);
    debug!(path = %path.display(), bytes = text.len(), "Writing header");

    std::fs::write(&path, text).map_err(|source| EmitError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!(
        path = %path.display(),
        width = artifact.width,
        height = artifact.height,
        data_len = artifact.data_len(),
        "Header written"
    );
    Ok(path)
}
