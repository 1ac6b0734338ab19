//! Integer luma and the scale/crop convention.
//!
//! All rescaling back into 0..=255 divides with ceiling rounding and then
//! clamps. Luma uses the BT.601 weights scaled by 256 (76, 150, 29).

/// Fixed-point divisor used by [`scale_crop`].
pub const LUMA_SCALE: i64 = 256;

const WEIGHT_R: i64 = 76;
const WEIGHT_G: i64 = 150;
const WEIGHT_B: i64 = 29;

/// Integer division rounding toward positive infinity. `d` must be positive.
pub fn ceil_div(v: i64, d: i64) -> i64 {
    debug_assert!(d > 0, "divisor must be positive");
    (v + d - 1).div_euclid(d)
}

/// Divide by `scale` rounding up, then clamp into `0..=255`.
pub fn scale_crop_by(v: i64, scale: i64) -> u8 {
    ceil_div(v, scale).clamp(0, 255) as u8
}

/// [`scale_crop_by`] with the default fixed-point scale of 256.
pub fn scale_crop(v: i64) -> u8 {
    scale_crop_by(v, LUMA_SCALE)
}

/// Per-channel `255 - c`.
pub fn invert(rgb: [u8; 3]) -> [u8; 3] {
    [255 - rgb[0], 255 - rgb[1], 255 - rgb[2]]
}

/// Perceptual luma of an RGB triple.
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(i64::from);
    scale_crop(WEIGHT_R * r + WEIGHT_G * g + WEIGHT_B * b)
}

/// Luma of the inverted color, so dark source pixels come out bright.
pub fn inverted_luma(rgb: [u8; 3]) -> u8 {
    luma(invert(rgb))
}
