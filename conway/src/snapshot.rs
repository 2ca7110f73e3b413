// snapshot.rs - Grid snapshots on disk
//
// A snapshot is the postcard encoding of PersistedSnapshot: height, width,
// then the row-major cells.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SnapshotError;
use crate::grid::Grid;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSnapshot {
    height: u32,
    width: u32,
    cells: Vec<bool>,
}

/// Writes `grid` to `path`, replacing any existing file.
pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let format_err = |reason: String| SnapshotError::Format { path: path.to_path_buf(), reason };

    let snapshot = PersistedSnapshot {
        height: u32::try_from(grid.height()).map_err(|e| format_err(e.to_string()))?,
        width: u32::try_from(grid.width()).map_err(|e| format_err(e.to_string()))?,
        cells: grid.cells().to_vec(),
    };
    let bytes = postcard::to_allocvec(&snapshot).map_err(|e| format_err(e.to_string()))?;
    fs::write(path, &bytes)
        .map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })?;

    info!(path = %path.display(), height = grid.height(), width = grid.width(), bytes = bytes.len(), "saved snapshot");
    Ok(())
}

/// Reads a grid back from `path`.
///
/// The whole file is decoded and validated before a `Grid` is built, so a
/// failure leaves nothing half-loaded.
pub fn load(path: impl AsRef<Path>) -> Result<Grid, SnapshotError> {
    let path = path.as_ref();
    let format_err = |reason: String| SnapshotError::Format { path: path.to_path_buf(), reason };

    let bytes = fs::read(path)
        .map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })?;
    let (snapshot, rest): (PersistedSnapshot, _) =
        postcard::take_from_bytes(&bytes).map_err(|e| format_err(e.to_string()))?;
    if !rest.is_empty() {
        return Err(format_err(format!("{} trailing bytes", rest.len())));
    }

    let grid = Grid::from_cells(snapshot.height as usize, snapshot.width as usize, snapshot.cells)
        .map_err(|e| format_err(e.to_string()))?;
    debug!(path = %path.display(), height = grid.height(), width = grid.width(), live = grid.live_count(), "loaded snapshot");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_keeps_every_cell() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pattern.life");
        let grid = Grid::from_rows(&["O..O.", ".OO..", "....O"]).unwrap();

        save(&grid, &path).unwrap();
        assert_eq!(load(&path).unwrap(), grid);
    }

    #[test]
    fn save_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pattern.life");
        save(&Grid::new(40, 40).unwrap(), &path).unwrap();
        let small = Grid::from_rows(&["O"]).unwrap();
        save(&small, &path).unwrap();
        assert_eq!(load(&path).unwrap(), small);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load(dir.path().join("nope.life")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }), "{err}");
    }

    #[test]
    fn garbage_is_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("junk.life");
        fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff").unwrap();
        assert!(matches!(load(&path), Err(SnapshotError::Format { .. })));
    }

    #[test]
    fn degenerate_dimensions_are_format_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flat.life");
        let bytes = postcard::to_allocvec(&PersistedSnapshot { height: 0, width: 4, cells: vec![] }).unwrap();
        fs::write(&path, bytes).unwrap();
        assert!(matches!(load(&path), Err(SnapshotError::Format { .. })));

        let bytes = postcard::to_allocvec(&PersistedSnapshot { height: 2, width: 2, cells: vec![true] }).unwrap();
        fs::write(&path, bytes).unwrap();
        assert!(matches!(load(&path), Err(SnapshotError::Format { .. })));
    }
}
