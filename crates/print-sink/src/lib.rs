//! Page-oriented print sinks.
//!
//! A [`PageSink`] takes job-level page configuration once, then a sequence
//! of drawn pages. [`CupsSink`] spools finished pages through `lpr`;
//! [`MemorySink`] collects them for dry runs and tests.

pub mod cups;
pub mod discovery;
pub mod memory;
pub mod page;
pub mod sink;

// Re-exports for convenience
pub use cups::CupsSink;
pub use discovery::{PrinterInfo, list_printers, resolve_printer};
pub use memory::MemorySink;
pub use page::PageCanvas;
pub use sink::{PageSink, PageSpec};

/// Errors that can occur while spooling pages to a printer.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to run {command}: {source}")]
    CommandLaunch {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Printer not found: {0}")]
    PrinterNotFound(String),

    #[error("No printers available")]
    NoPrinters,

    #[error("Spool I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode page: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Page sink not started")]
    NotStarted,
}

/// Result type alias for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;
