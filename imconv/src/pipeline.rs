//! One conversion run: decode, check, convert, emit, register.
//!
//! Every precondition (file name, scale factors, color model) is checked
//! before the header is written, and the side lists are only touched after
//! the header write succeeded.

use std::path::{Path, PathBuf};

use anyhow::Context;
use header_emitter::{ImageArtifact, Registrar, Symbols, write_header};
use image::{DynamicImage, ImageFormat, ImageReader};
use mono_bitmap::{ScaleFactors, SourceImage};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::diagnostics::{SourceInfo, comment_block};

/// Flags written to the header; reserved.
const IMAGE_FLAGS: u8 = 0;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub header_path: PathBuf,
    pub symbols: Symbols,
    pub width: u32,
    pub height: u32,
    pub data_len: usize,
    pub lit_pixels: usize,
}

/// Open and decode an image, guessing the format from its contents.
pub fn decode(path: &Path) -> anyhow::Result<(DynamicImage, Option<ImageFormat>)> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to read image {}", path.display()))?;
    let format = reader.format();
    let image = reader
        .decode()
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    Ok((image, format))
}

/// Convert the configured input and append to the lists it names.
pub fn run(config: &AppConfig) -> anyhow::Result<ConversionReport> {
    let mut registrar = config.registrar();
    convert_file(config, &mut registrar)
}

/// Convert the configured input, registering it with `registrar`.
pub fn convert_file(config: &AppConfig, registrar: &mut Registrar) -> anyhow::Result<ConversionReport> {
    let symbols = Symbols::from_source(&config.input)?;
    let (image, format) = decode(&config.input)?;
    let (src_w, src_h) = (image.width(), image.height());
    info!(
        input = %config.input.display(),
        width = src_w,
        height = src_h,
        color = ?image.color(),
        "Decoded image"
    );

    let opts = config.convert_options();
    let scale = ScaleFactors::compute(src_w, src_h, opts.dest_width, opts.dest_height)?;
    info!(scale_x = scale.x, scale_y = scale.y, "Scale factors");

    let src = SourceImage::new(image)?;
    let bitmap = mono_bitmap::convert(&src, &opts)?;
    for line in mono_bitmap::ascii_preview(&bitmap.grid) {
        debug!("|{line}|");
    }

    let comments = if config.comments {
        let info = SourceInfo {
            width: src_w,
            height: src_h,
            model: src.model(),
            format,
        };
        comment_block(&config.input, &info, &bitmap)
    } else {
        String::new()
    };

    let lit_pixels = bitmap.grid.count_set();
    let artifact = ImageArtifact {
        symbols,
        width: bitmap.width,
        height: bitmap.height,
        flags: IMAGE_FLAGS,
        data: bitmap.data,
        comments,
    };
    let header_path = write_header(&config.output_folder, &artifact, &config.header_options())?;
    registrar.register(&artifact.symbols)?;

    Ok(ConversionReport {
        header_path,
        width: artifact.width,
        height: artifact.height,
        data_len: artifact.data_len(),
        lit_pixels,
        symbols: artifact.symbols,
    })
}
