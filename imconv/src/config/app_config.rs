//! Runtime configuration for one conversion run.

use std::path::PathBuf;

use header_emitter::{AppendFileSink, HeaderOptions, Registrar, RegistrationSink};
use mono_bitmap::ConvertOptions;

use super::args::Args;
use super::{defaults, validation};

/// Resolved configuration for a single conversion.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output_folder: PathBuf,
    pub include_list: Option<PathBuf>,
    pub struct_list: Option<PathBuf>,
    pub dest_width: u32,
    pub dest_height: u32,
    pub threshold: u8,
    pub items_per_row: usize,
    pub comments: bool,
}

impl AppConfig {
    /// Configuration with defaults for everything but the input.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_folder: PathBuf::from(defaults::OUTPUT_FOLDER),
            include_list: None,
            struct_list: None,
            dest_width: defaults::DEST_WIDTH,
            dest_height: defaults::DEST_HEIGHT,
            threshold: defaults::THRESHOLD,
            items_per_row: defaults::ITEMS_PER_ROW,
            comments: true,
        }
    }

    /// Build from parsed arguments. Empty list paths mean "not configured".
    pub fn from_args(args: Args) -> Self {
        let non_empty = |p: Option<PathBuf>| p.filter(|p| !p.as_os_str().is_empty());
        Self {
            input: args.input,
            output_folder: args.output_folder,
            include_list: non_empty(args.append_include_list),
            struct_list: non_empty(args.append_struct_list),
            dest_width: args.dest_w,
            dest_height: args.dest_h,
            threshold: args.thr,
            items_per_row: args.items_per_row,
            comments: !args.no_comments,
        }
    }

    /// Check option values and log warnings for questionable ones.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validation::validate_config(self).map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
        for warning in validation::config_warnings(self) {
            tracing::warn!("{warning}");
        }
        Ok(())
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_dest_width(self.dest_width)
            .with_dest_height(self.dest_height)
            .with_threshold(self.threshold)
    }

    pub fn header_options(&self) -> HeaderOptions {
        HeaderOptions::new()
            .with_items_per_row(self.items_per_row)
            .with_comments(self.comments)
    }

    /// File sinks for the configured lists, resolved against the output folder.
    pub fn registrar(&self) -> Registrar {
        let sink = |name: &PathBuf| -> Box<dyn RegistrationSink> {
            Box::new(AppendFileSink::new(self.output_folder.join(name)))
        };
        Registrar::new(
            self.include_list.as_ref().map(sink),
            self.struct_list.as_ref().map(sink),
        )
    }
}
