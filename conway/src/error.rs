// error.rs - Error types for the engine, snapshots and recordings

use std::io;
use std::path::PathBuf;

/// Grid construction or indexing failures.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("degenerate grid shape {height}x{width}")]
    Degenerate { height: usize, width: usize },

    #[error("cell ({row}, {col}) is outside a {height}x{width} grid")]
    OutOfBounds { row: usize, col: usize, height: usize, width: usize },

    #[error("expected {expected} cells, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Snapshot save/load failures. A failed load never touches the caller's grid.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid snapshot: {reason}", path.display())]
    Format { path: PathBuf, reason: String },
}

/// Failures writing the recorded animation.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("cannot write recording to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode recording: {0}")]
    Encode(#[from] image::ImageError),
}
