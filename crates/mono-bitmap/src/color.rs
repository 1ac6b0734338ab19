//! Color model dispatch and per-pixel normalization to RGB.
//!
//! Only three source models are accepted: grayscale with an explicit bit
//! depth, RGB and RGBA. 16-bit RGB(A) keeps the high byte of each channel.
//! Everything else is rejected when the [`SourceImage`] is built, before any
//! pixel is read.

use std::fmt;

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tracing::debug;

use crate::luma::{LUMA_SCALE, scale_crop_by};
use crate::{MonoBitmapError, Result};

/// Background that transparent pixels are composited over.
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Supported source color models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    /// Single intensity channel `bits` wide (tag `I;<bits>`).
    Gray { bits: u8 },
    Rgb,
    Rgba,
}

impl ColorModel {
    /// Map a decoded buffer to its color model.
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        match img {
            DynamicImage::ImageLuma8(_) => Ok(Self::Gray { bits: 8 }),
            DynamicImage::ImageLuma16(_) => Ok(Self::Gray { bits: 16 }),
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgb16(_) => Ok(Self::Rgb),
            DynamicImage::ImageRgba8(_) | DynamicImage::ImageRgba16(_) => Ok(Self::Rgba),
            other => Err(MonoBitmapError::UnsupportedColorModel(format!(
                "{:?}",
                other.color()
            ))),
        }
    }

    /// Divisor that brings a raw gray sample down to 8 bits.
    fn gray_divisor(self) -> i64 {
        match self {
            Self::Gray { bits } => (1i64 << bits) / 256,
            _ => 1,
        }
    }

    /// Reduce one sample of this model to an RGB triple in `0..=255`.
    pub fn normalize(self, sample: Sample) -> [u8; 3] {
        match sample {
            Sample::Gray(v) => {
                let g = scale_crop_by(i64::from(v), self.gray_divisor());
                [g, g, g]
            }
            Sample::Rgb(rgb) => rgb,
            Sample::Rgba(rgba) => composite_over(rgba, BACKGROUND),
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray { bits } => write!(f, "I;{bits}"),
            Self::Rgb => f.write_str("RGB"),
            Self::Rgba => f.write_str("RGBA"),
        }
    }
}

/// One raw source pixel; the shape follows the color model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Gray(u16),
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

/// Composite an RGBA pixel over an opaque background.
///
/// Each channel is `(255 - a) * bg + a * c` brought back to `0..=255` with
/// the ceiling scale/crop.
pub fn composite_over(rgba: [u8; 4], bg: [u8; 3]) -> [u8; 3] {
    let alpha = i64::from(rgba[3]);
    std::array::from_fn(|i| {
        let mixed = (255 - alpha) * i64::from(bg[i]) + alpha * i64::from(rgba[i]);
        scale_crop_by(mixed, LUMA_SCALE)
    })
}

fn high_byte(v: u16) -> u8 {
    (v >> 8) as u8
}

enum Pixels {
    Gray8(GrayImage),
    Gray16(ImageBuffer<Luma<u16>, Vec<u16>>),
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

/// A decoded image whose color model is known to be supported.
pub struct SourceImage {
    pixels: Pixels,
    model: ColorModel,
    width: u32,
    height: u32,
}

impl SourceImage {
    /// Take ownership of a decoded image, rejecting unsupported color models.
    pub fn new(img: DynamicImage) -> Result<Self> {
        let model = ColorModel::from_dynamic(&img)?;
        let (width, height) = (img.width(), img.height());
        let pixels = match img {
            DynamicImage::ImageLuma8(buf) => Pixels::Gray8(buf),
            DynamicImage::ImageLuma16(buf) => Pixels::Gray16(buf),
            DynamicImage::ImageRgb8(buf) => Pixels::Rgb(buf),
            DynamicImage::ImageRgba8(buf) => Pixels::Rgba(buf),
            DynamicImage::ImageRgb16(buf) => {
                Pixels::Rgb(ImageBuffer::from_fn(width, height, |x, y| {
                    Rgb(buf.get_pixel(x, y).0.map(high_byte))
                }))
            }
            DynamicImage::ImageRgba16(buf) => {
                Pixels::Rgba(ImageBuffer::from_fn(width, height, |x, y| {
                    Rgba(buf.get_pixel(x, y).0.map(high_byte))
                }))
            }
            other => {
                return Err(MonoBitmapError::UnsupportedColorModel(format!(
                    "{:?}",
                    other.color()
                )));
            }
        };
        debug!(width, height, %model, "Loaded source image");
        Ok(Self {
            pixels,
            model,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Raw sample at `(x, y)`. Panics when out of bounds, like `get_pixel`.
    pub fn sample(&self, x: u32, y: u32) -> Sample {
        match &self.pixels {
            Pixels::Gray8(buf) => Sample::Gray(u16::from(buf.get_pixel(x, y).0[0])),
            Pixels::Gray16(buf) => Sample::Gray(buf.get_pixel(x, y).0[0]),
            Pixels::Rgb(buf) => Sample::Rgb(buf.get_pixel(x, y).0),
            Pixels::Rgba(buf) => Sample::Rgba(buf.get_pixel(x, y).0),
        }
    }

    /// Normalized RGB at `(x, y)`.
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.model.normalize(self.sample(x, y))
    }
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA};
    use rstest::rstest;

    #[rstest]
    #[case(DynamicImage::new_luma8(1, 1), ColorModel::Gray { bits: 8 }, "I;8")]
    #[case(DynamicImage::new_luma16(1, 1), ColorModel::Gray { bits: 16 }, "I;16")]
    #[case(DynamicImage::new_rgb8(1, 1), ColorModel::Rgb, "RGB")]
    #[case(DynamicImage::new_rgb16(1, 1), ColorModel::Rgb, "RGB")]
    #[case(DynamicImage::new_rgba8(1, 1), ColorModel::Rgba, "RGBA")]
    #[case(DynamicImage::new_rgba16(1, 1), ColorModel::Rgba, "RGBA")]
    fn test_model_from_dynamic(
        #[case] img: DynamicImage,
        #[case] expected: ColorModel,
        #[case] tag: &str,
    ) {
        let model = ColorModel::from_dynamic(&img).unwrap();
        assert_eq!(model, expected);
        assert_eq!(model.to_string(), tag);
    }

    #[rstest]
    #[case(DynamicImage::new_luma_a8(1, 1))]
    #[case(DynamicImage::new_luma_a16(1, 1))]
    #[case(DynamicImage::new_rgb32f(1, 1))]
    #[case(DynamicImage::new_rgba32f(1, 1))]
    fn test_model_from_dynamic_rejects(#[case] img: DynamicImage) {
        assert!(matches!(
            ColorModel::from_dynamic(&img),
            Err(MonoBitmapError::UnsupportedColorModel(_))
        ));
    }

    #[test]
    fn test_sixteen_bit_color_keeps_high_byte() {
        let rgb =
            ImageBuffer::<Rgb<u16>, Vec<u16>>::from_pixel(2, 2, Rgb([0x12ff, 0x8000, 0xffff]));
        let src = SourceImage::new(DynamicImage::ImageRgb16(rgb)).unwrap();
        assert_eq!(src.model(), ColorModel::Rgb);
        assert_eq!(src.sample(1, 1), Sample::Rgb([0x12, 0x80, 0xff]));

        let rgba = ImageBuffer::<Rgba<u16>, Vec<u16>>::from_pixel(
            1,
            1,
            Rgba([0, 0x01ff, 0xfe00, 0xffff]),
        );
        let src = SourceImage::new(DynamicImage::ImageRgba16(rgba)).unwrap();
        assert_eq!(src.model(), ColorModel::Rgba);
        assert_eq!(src.sample(0, 0), Sample::Rgba([0x00, 0x01, 0xfe, 0xff]));
    }

    #[test]
    fn test_composite_opaque_passes_through() {
        assert_eq!(composite_over([255, 255, 255, 255], BACKGROUND), [255, 255, 255]);
        assert_eq!(composite_over([0, 0, 0, 255], BACKGROUND), [0, 0, 0]);
        assert_eq!(composite_over([10, 128, 200, 255], BACKGROUND), [10, 128, 200]);
    }

    #[test]
    fn test_composite_transparent_shows_background() {
        assert_eq!(composite_over([0, 0, 0, 0], BACKGROUND), [255, 255, 255]);
        assert_eq!(composite_over([0, 0, 0, 0], [0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn test_composite_half_alpha_rounds_up() {
        // 127 * 255 = 32385, ceil(32385 / 256) = 127
        assert_eq!(composite_over([0, 0, 0, 128], BACKGROUND), [127, 127, 127]);
    }

    #[test]
    fn test_normalize_gray_16_bit_scales_down() {
        let model = ColorModel::Gray { bits: 16 };
        assert_eq!(model.normalize(Sample::Gray(0)), [0, 0, 0]);
        assert_eq!(model.normalize(Sample::Gray(65535)), [255, 255, 255]);
        // ceil(257 / 256) = 2
        assert_eq!(model.normalize(Sample::Gray(257)), [2, 2, 2]);
    }

    #[test]
    fn test_normalize_gray_8_bit_is_identity() {
        let model = ColorModel::Gray { bits: 8 };
        assert_eq!(model.normalize(Sample::Gray(77)), [77, 77, 77]);
    }

    #[test]
    fn test_source_image_samples() {
        let rgba = RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 4]));
        let src = SourceImage::new(DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(src.model(), ColorModel::Rgba);
        assert_eq!(src.sample(1, 0), Sample::Rgba([1, 2, 3, 4]));

        let rgb = RgbImage::from_pixel(1, 1, Rgb([9, 8, 7]));
        let src = SourceImage::new(DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(src.rgb(0, 0), [9, 8, 7]);
    }

    #[test]
    fn test_source_image_rejects_gray_alpha() {
        let img = GrayAlphaImage::from_pixel(2, 2, LumaA([0, 255]));
        let err = SourceImage::new(DynamicImage::ImageLumaA8(img)).unwrap_err();
        assert!(matches!(err, MonoBitmapError::UnsupportedColorModel(_)));
    }
}
