//! Page-interleaved bit packing for SSD1306-class controllers.
//!
//! The display is addressed in pages of 8 rows. Each byte holds one column of
//! a page with bit 0 as the topmost row. Bytes run page by page and, within a
//! page, column by column from the left.

use crate::downscale::BinaryGrid;
use crate::{MonoBitmapError, PAGE_HEIGHT, Result};

/// Pages needed to cover `height` rows.
pub fn page_count(height: u32) -> u32 {
    height.div_ceil(PAGE_HEIGHT)
}

/// Length of the packed byte stream for a `width x height` grid.
pub fn packed_len(width: u32, height: u32) -> usize {
    width as usize * page_count(height) as usize
}

/// Collects bits LSB first and hands back a byte once eight have been pushed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteAccumulator {
    byte: u8,
    filled: u8,
}

impl ByteAccumulator {
    /// Push the next bit. Returns the finished byte after the eighth push.
    pub fn push(&mut self, bit: bool) -> Option<u8> {
        if bit {
            self.byte |= 1 << self.filled;
        }
        self.filled += 1;
        if self.filled == 8 {
            return self.take();
        }
        None
    }

    /// Emit a partially filled byte, if any bits were pushed.
    pub fn flush(&mut self) -> Option<u8> {
        if self.filled > 0 { self.take() } else { None }
    }

    fn take(&mut self) -> Option<u8> {
        let out = self.byte;
        *self = Self::default();
        Some(out)
    }
}

/// Pack a grid into the controller's page layout.
///
/// Rows past the bottom of the grid in the last page stay zero.
pub fn pack_pages(grid: &BinaryGrid) -> Vec<u8> {
    let (width, height) = (grid.width(), grid.height());
    let mut out = Vec::with_capacity(packed_len(width, height));
    let mut acc = ByteAccumulator::default();

    for page in 0..page_count(height) {
        for x in 0..width {
            for row in 0..PAGE_HEIGHT {
                let y = page * PAGE_HEIGHT + row;
                let lit = y < height && grid.get(x, y);
                if let Some(byte) = acc.push(lit) {
                    out.push(byte);
                }
            }
            if let Some(byte) = acc.flush() {
                out.push(byte);
            }
        }
    }

    out
}

/// Inverse of [`pack_pages`].
pub fn unpack_pages(data: &[u8], width: u32, height: u32) -> Result<BinaryGrid> {
    let expected = packed_len(width, height);
    if data.len() != expected {
        return Err(MonoBitmapError::PackedLength {
            expected,
            actual: data.len(),
        });
    }

    let mut grid = BinaryGrid::new(width, height);
    for (i, &byte) in data.iter().enumerate() {
        let page = i as u32 / width.max(1);
        let x = i as u32 % width.max(1);
        for row in 0..PAGE_HEIGHT {
            let y = page * PAGE_HEIGHT + row;
            if y < height && byte & (1 << row) != 0 {
                grid.set(x, y, true);
            }
        }
    }
    Ok(grid)
}
