//! Block-average downscaling with threshold binarization.
//!
//! The source is cut into `scale.x * scale.y` blocks, one per destination
//! pixel. Each block's inverted luma is averaged with floor division and the
//! destination bit is set when the mean is strictly above the threshold.

use tracing::debug;

use crate::color::SourceImage;
use crate::luma::inverted_luma;
use crate::options::ConvertOptions;
use crate::{MonoBitmapError, Result};

/// Integer block size along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactors {
    pub x: u32,
    pub y: u32,
}

impl ScaleFactors {
    /// Derive the block size and check that it reproduces the destination
    /// size exactly with no partial blocks.
    pub fn compute(src_w: u32, src_h: u32, dest_w: u32, dest_h: u32) -> Result<Self> {
        if dest_w == 0 || dest_h == 0 {
            return Err(MonoBitmapError::InvalidDestination {
                width: dest_w,
                height: dest_h,
            });
        }
        let x = (src_w / dest_w).max(1);
        let y = (src_h / dest_h).max(1);

        let (actual_w, actual_h) = (src_w / x, src_h / y);
        if actual_w != dest_w || actual_h != dest_h {
            return Err(MonoBitmapError::InexactScale {
                scale_x: x,
                scale_y: y,
                actual_width: actual_w,
                actual_height: actual_h,
                expected_width: dest_w,
                expected_height: dest_h,
            });
        }
        if src_w % x != 0 || src_h % y != 0 {
            return Err(MonoBitmapError::UnevenTiling {
                width: src_w,
                height: src_h,
                scale_x: x,
                scale_y: y,
            });
        }
        Ok(Self { x, y })
    }

    /// Number of source pixels in one block.
    pub fn block_area(&self) -> u64 {
        u64::from(self.x) * u64::from(self.y)
    }
}

/// Row-major matrix of single-bit pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGrid {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BinaryGrid {
    /// All-clear grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Build from complete rows. Every row must be `width` long.
    pub fn from_rows(width: u32, rows: Vec<Vec<bool>>) -> Self {
        let height = rows.len() as u32;
        let bits: Vec<bool> = rows.into_iter().flatten().collect();
        assert_eq!(
            bits.len(),
            width as usize * height as usize,
            "rows must all be {width} wide"
        );
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        let i = self.index(x, y);
        self.bits[i] = value;
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.bits.chunks(self.width.max(1) as usize)
    }

    /// Number of lit pixels.
    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Downscaler output: the grid and the block size that produced it.
#[derive(Debug, Clone)]
pub struct Downscaled {
    pub grid: BinaryGrid,
    pub scale: ScaleFactors,
}

/// Mean inverted luma over one block, floor-divided.
pub fn block_mean(src: &SourceImage, bx: u32, by: u32, scale: ScaleFactors) -> u64 {
    let mut sum = 0u64;
    for y in by..by + scale.y {
        for x in bx..bx + scale.x {
            sum += u64::from(inverted_luma(src.rgb(x, y)));
        }
    }
    sum / scale.block_area()
}

fn threshold_row(
    src: &SourceImage,
    dy: u32,
    width: u32,
    scale: ScaleFactors,
    thr: u8,
) -> Vec<bool> {
    (0..width)
        .map(|dx| block_mean(src, dx * scale.x, dy * scale.y, scale) > u64::from(thr))
        .collect()
}

/// Reduce `src` to the destination grid described by `opts`.
pub fn downscale(src: &SourceImage, opts: &ConvertOptions) -> Result<Downscaled> {
    opts.validate()?;
    let scale = ScaleFactors::compute(
        src.width(),
        src.height(),
        opts.dest_width,
        opts.dest_height,
    )?;
    let (w, h) = (opts.dest_width, opts.dest_height);

    debug!(
        src_w = src.width(),
        src_h = src.height(),
        scale_x = scale.x,
        scale_y = scale.y,
        threshold = opts.threshold,
        "Downscaling by block average"
    );

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<bool>> = {
        use rayon::prelude::*;
        (0..h)
            .into_par_iter()
            .map(|dy| threshold_row(src, dy, w, scale, opts.threshold))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<bool>> = (0..h)
        .map(|dy| threshold_row(src, dy, w, scale, opts.threshold))
        .collect();

    let grid = BinaryGrid::from_rows(w, rows);
    debug!(lit = grid.count_set(), "Downscale complete");
    Ok(Downscaled { grid, scale })
}
