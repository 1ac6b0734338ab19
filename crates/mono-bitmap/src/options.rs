//! Conversion options.
//!
//! Destination geometry and the threshold applied to each block's mean
//! inverted luma.

use crate::{DEFAULT_THRESHOLD, MonoBitmapError, Result};

/// Default destination width in pixels.
pub const DEFAULT_DEST_WIDTH: u32 = 16;

/// Default destination height in pixels.
pub const DEFAULT_DEST_HEIGHT: u32 = 16;

/// Configuration options for a single conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Exact destination width; the source width must tile it evenly.
    pub dest_width: u32,

    /// Exact destination height; the source height must tile it evenly.
    pub dest_height: u32,

    /// A block becomes a lit pixel when its mean is strictly above this.
    pub threshold: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dest_width: DEFAULT_DEST_WIDTH,
            dest_height: DEFAULT_DEST_HEIGHT,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ConvertOptions {
    /// Create options with the 16x16 / 127 defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set destination width.
    pub fn with_dest_width(mut self, val: u32) -> Self {
        self.dest_width = val;
        self
    }

    /// Builder: set destination height.
    pub fn with_dest_height(mut self, val: u32) -> Self {
        self.dest_height = val;
        self
    }

    /// Builder: set threshold.
    pub fn with_threshold(mut self, val: u8) -> Self {
        self.threshold = val;
        self
    }

    /// Reject a zero-sized destination.
    pub fn validate(&self) -> Result<()> {
        if self.dest_width == 0 || self.dest_height == 0 {
            return Err(MonoBitmapError::InvalidDestination {
                width: self.dest_width,
                height: self.dest_height,
            });
        }
        Ok(())
    }
}
