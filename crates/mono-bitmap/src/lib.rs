//! Monochrome bitmap conversion for page-addressed OLED controllers.
//!
//! Reduces a decoded raster image to an exact destination resolution by
//! block averaging, thresholds each block on inverted luma, and packs the
//! result into the SSD1306 page layout (8 vertical pixels per byte, LSB on
//! top, pages of 8 rows, columns left to right).

pub mod color;
pub mod downscale;
pub mod luma;
pub mod options;
pub mod pack;
pub mod preview;

// Re-exports for convenience
pub use color::{ColorModel, Sample, SourceImage};
pub use downscale::{BinaryGrid, Downscaled, ScaleFactors, downscale};
pub use options::ConvertOptions;
pub use pack::{pack_pages, packed_len, page_count, unpack_pages};
pub use preview::ascii_preview;

/// Rows covered by one page of the display controller.
pub const PAGE_HEIGHT: u32 = 8;

/// Default inverted-luma threshold; a block lights up when its mean is above it.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum MonoBitmapError {
    #[error("Unsupported image format {0}")]
    UnsupportedColorModel(String),

    #[error(
        "Cannot find good scale factor: scale factor X: {scale_x}, scale factor Y: {scale_y}, \
         result image width: {actual_width} but expected {expected_width}, \
         result image height: {actual_height} but expected {expected_height}"
    )]
    InexactScale {
        scale_x: u32,
        scale_y: u32,
        actual_width: u32,
        actual_height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error(
        "Source {width}x{height} does not tile evenly into {scale_x}x{scale_y} blocks"
    )]
    UnevenTiling {
        width: u32,
        height: u32,
        scale_x: u32,
        scale_y: u32,
    },

    #[error("Invalid destination size {width}x{height}")]
    InvalidDestination { width: u32, height: u32 },

    #[error("Packed data length mismatch: expected {expected} bytes, got {actual}")]
    PackedLength { expected: usize, actual: usize },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, MonoBitmapError>;

/// A fully converted image: destination geometry, the thresholded grid and
/// its packed byte stream.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub scale: ScaleFactors,
    pub grid: BinaryGrid,
    pub data: Vec<u8>,
}

/// Run the whole pipeline on an already decoded image.
pub fn convert(src: &SourceImage, opts: &ConvertOptions) -> Result<Bitmap> {
    let Downscaled { grid, scale } = downscale(src, opts)?;
    let data = pack_pages(&grid);
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        bytes = data.len(),
        "Packed bitmap"
    );
    Ok(Bitmap {
        width: grid.width(),
        height: grid.height(),
        scale,
        grid,
        data,
    })
}
