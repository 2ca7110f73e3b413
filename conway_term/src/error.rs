// error.rs - Error types for the terminal front end

use std::io;

use conway::{GridError, RecordError, SnapshotError};

/// Host terminal failures. Always fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("terminal is {cols}x{rows}; at least {min_cols}x{min_rows} is needed")]
    TooSmall { rows: u16, cols: u16, min_rows: u16, min_cols: u16 },
}

/// Anything that can end a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("unknown pattern {name:?}; choose one of: {choices}")]
    UnknownPattern { name: String, choices: String },
}
