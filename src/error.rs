//! Error types for board construction, parsing, editing and rollback.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by [`TorusLife`](crate::TorusLife) and the board loader.
///
/// Every failing operation leaves the board exactly as it was before the call.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Live and dead symbols collide, or another configuration knob is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The board description could not be parsed.
    #[error("invalid board description (line {line}): {reason}")]
    Format { line: usize, reason: String },

    /// The board description file could not be opened.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A flat cell index lies outside the board.
    #[error("cell index {index} out of range for board of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },

    /// A row/column pair lies outside the board.
    #[error("cell ({row}, {col}) out of range for {width}x{height} board")]
    CellOutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// Rollback requested while no generations are recoverable.
    #[error("no history available to roll back")]
    InsufficientHistory,

    /// Rollback requested further than the recoverable history reaches.
    #[error("cannot roll back {requested} generations, only {available} available")]
    OutOfRange { requested: u64, available: usize },

    /// The dedicated evaluation thread pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, LifeError>;
