//! Command-line arguments. Every option can also be set from an `IMCONV_*`
//! environment variable or a `.env` file.

use std::path::PathBuf;

use clap::Parser;

use super::defaults;

/// Convert an image to a packed 1-bpp SSD1306 bitmap in a C header.
#[derive(Debug, Clone, Parser)]
#[command(name = "imconv", version, about)]
pub struct Args {
    /// Input image file
    #[arg(long, env = "IMCONV_INPUT")]
    pub input: PathBuf,

    /// File (inside the output folder) that collects `#include` lines
    #[arg(long, visible_alias = "append_include_list", env = "IMCONV_INCLUDE_LIST")]
    pub append_include_list: Option<PathBuf>,

    /// File (inside the output folder) that collects image records
    #[arg(long, visible_alias = "append_struct_list", env = "IMCONV_STRUCT_LIST")]
    pub append_struct_list: Option<PathBuf>,

    /// Folder for the header and both lists
    #[arg(long, visible_alias = "output_folder", env = "IMCONV_OUTPUT_FOLDER", default_value = defaults::OUTPUT_FOLDER)]
    pub output_folder: PathBuf,

    /// Destination width in pixels
    #[arg(long, visible_alias = "dest_w", env = "IMCONV_DEST_W", default_value_t = defaults::DEST_WIDTH)]
    pub dest_w: u32,

    /// Destination height in pixels
    #[arg(long, visible_alias = "dest_h", env = "IMCONV_DEST_H", default_value_t = defaults::DEST_HEIGHT)]
    pub dest_h: u32,

    /// Inverted-luma threshold; blocks with a higher mean become lit pixels
    #[arg(long, env = "IMCONV_THR", default_value_t = defaults::THRESHOLD)]
    pub thr: u8,

    /// Byte literals per line in the data array
    #[arg(long, visible_alias = "items_per_row", env = "IMCONV_ITEMS_PER_ROW", default_value_t = defaults::ITEMS_PER_ROW)]
    pub items_per_row: usize,

    /// Leave the diagnostics comment block out of the header
    #[arg(long)]
    pub no_comments: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["imconv", "--input", "a.png"]).unwrap();
        assert_eq!(args.input, PathBuf::from("a.png"));
        assert_eq!(args.output_folder, PathBuf::from("."));
        assert_eq!((args.dest_w, args.dest_h, args.thr), (16, 16, 127));
        assert_eq!(args.items_per_row, 8);
        assert!(args.append_include_list.is_none());
        assert!(!args.no_comments);
    }

    #[test]
    fn test_underscore_aliases() {
        let args = Args::try_parse_from([
            "imconv",
            "--input",
            "a.png",
            "--dest_w",
            "128",
            "--dest_h",
            "64",
            "--append_include_list",
            "inc_imgs.h",
            "--append_struct_list",
            "inc_struct.h",
            "--output_folder",
            "out",
        ])
        .unwrap();
        assert_eq!((args.dest_w, args.dest_h), (128, 64));
        assert_eq!(args.append_include_list, Some(PathBuf::from("inc_imgs.h")));
        assert_eq!(args.append_struct_list, Some(PathBuf::from("inc_struct.h")));
        assert_eq!(args.output_folder, PathBuf::from("out"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert!(Args::try_parse_from(["imconv", "--input", "a.png", "--thr", "256"]).is_err());
    }

    #[test]
    fn test_input_required() {
        // Guard against a stray IMCONV_INPUT in the test environment.
        if std::env::var_os("IMCONV_INPUT").is_none() {
            assert!(Args::try_parse_from(["imconv"]).is_err());
        }
    }
}
