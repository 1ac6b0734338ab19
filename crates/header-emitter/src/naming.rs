//! Symbol and file names derived from the source image path.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{EmitError, Result};

static RE_NON_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

/// Every name the header and the registration lines refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols {
    /// Include guard and prefix of every define, e.g. `IMG_logo`.
    pub base: String,
    /// Source file name without extension, stored in the `_FILENAME` define.
    pub stem: String,
    /// Generated header file name, e.g. `Img_logo_png.h`.
    pub header_file: String,
}

impl Symbols {
    /// Derive names from a source image path.
    pub fn from_source(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EmitError::InvalidSourceName(path.display().to_string()))?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        Ok(Self {
            base: format!("IMG_{}", RE_NON_IDENT.replace_all(stem, "_")),
            stem: stem.to_string(),
            header_file: format!("Img_{stem}_{ext}.h"),
        })
    }

    pub fn width(&self) -> String {
        format!("{}_W", self.base)
    }

    pub fn height(&self) -> String {
        format!("{}_H", self.base)
    }

    pub fn flags(&self) -> String {
        format!("{}_FLAGS", self.base)
    }

    pub fn filename(&self) -> String {
        format!("{}_FILENAME", self.base)
    }

    pub fn data(&self) -> String {
        format!("{}_Data", self.base)
    }

    pub fn data_len(&self) -> String {
        format!("{}_DATA_LEN", self.base)
    }
}
