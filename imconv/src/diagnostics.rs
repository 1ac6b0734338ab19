//! Text for the header's comment block.

use std::path::Path;

use image::ImageFormat;
use mono_bitmap::{Bitmap, ColorModel, ascii_preview};

/// What the decoder reported about the source image.
#[derive(Debug, Clone, Copy)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
    pub model: ColorModel,
    pub format: Option<ImageFormat>,
}

/// Conversion summary followed by an ASCII rendering of the result.
pub fn comment_block(input: &Path, info: &SourceInfo, bitmap: &Bitmap) -> String {
    let format = info
        .format
        .map_or_else(|| "unknown".to_string(), |format| format!("{format:?}"));
    let mut out = format!(
        "Filename: {}\n\
         Input image Width: {}\n\
         Input image Height: {}\n\
         Scale factor X: {}\n\
         Scale factor Y: {}\n\
         Result image Width: {}\n\
         Result image Height: {}\n\
         Mode: {}\n\
         Format: {format}\n",
        input.display(),
        info.width,
        info.height,
        bitmap.scale.x,
        bitmap.scale.y,
        bitmap.width,
        bitmap.height,
        info.model,
    );
    for line in ascii_preview(&bitmap.grid) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
