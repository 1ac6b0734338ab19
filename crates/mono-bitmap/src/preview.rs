//! Plain-text rendering of a thresholded grid.

use crate::downscale::BinaryGrid;

/// One string per row, `*` for a lit pixel and a space otherwise.
pub fn ascii_preview(grid: &BinaryGrid) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().map(|&lit| if lit { '*' } else { ' ' }).collect())
        .collect()
}
