// lib.rs - Conway's Game of Life engine: grid, step rule, patterns, snapshots
// and frame recording. Nothing here touches a terminal.

pub mod cursor;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod recorder;
pub mod snapshot;

pub use cursor::{Cursor, Direction};
pub use engine::{BoundaryPolicy, randomize, step};
pub use error::{GridError, RecordError, SnapshotError};
pub use grid::Grid;
pub use recorder::FrameRecorder;
