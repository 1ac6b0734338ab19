//! Default values for every option.

pub const OUTPUT_FOLDER: &str = ".";
pub const DEST_WIDTH: u32 = mono_bitmap::options::DEFAULT_DEST_WIDTH;
pub const DEST_HEIGHT: u32 = mono_bitmap::options::DEFAULT_DEST_HEIGHT;
pub const THRESHOLD: u8 = mono_bitmap::DEFAULT_THRESHOLD;
pub const ITEMS_PER_ROW: usize = header_emitter::header::DEFAULT_ITEMS_PER_ROW;

/// Largest geometry value the 8-bit image record can carry.
pub const MAX_RECORD_GEOMETRY: u32 = u8::MAX as u32;
