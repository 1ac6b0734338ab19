//! C header emission for packed monochrome images.
//!
//! Renders a packed byte stream and its geometry as a self-contained C
//! header, and appends registration lines (an `#include` list and an
//! image-record list) to side files shared across runs.

pub mod header;
pub mod naming;
pub mod registration;

// Re-exports for convenience
pub use header::{HeaderOptions, ImageArtifact, render_header, write_header};
pub use naming::Symbols;
pub use registration::{
    AppendFileSink, MemorySink, Registrar, RegistrationSink, include_line, struct_line,
};

/// Errors that can occur while emitting artifacts.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Source path has no usable file name: {0}")]
    InvalidSourceName(String),

    #[error("Items per row must be greater than 0")]
    InvalidItemsPerRow,

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for emitter operations.
pub type Result<T> = std::result::Result<T, EmitError>;
