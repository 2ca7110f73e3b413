use conway::patterns;
use conway::{BoundaryPolicy, Cursor, Direction, Grid, SnapshotError, randomize, snapshot, step};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::tempdir;

#[test]
fn drawn_blinker_turns_horizontal() {
    let mut grid = Grid::new(3, 3).unwrap();
    for row in 0..3 {
        grid.set(row, 1, true).unwrap();
    }

    let next = step(&grid, BoundaryPolicy::Bounded);
    assert_eq!(next.row_text(0, 0..3), "   ");
    assert_eq!(next.row_text(1, 0..3), "OOO");
    assert_eq!(next.row_text(2, 0..3), "   ");

    // On a 3x3 torus every cell neighbours every other: the three live cells
    // keep two neighbours each and every dead cell sees three.
    assert_eq!(step(&grid, BoundaryPolicy::Toroidal).live_count(), 9);
}

#[test]
fn toroidal_wrap_matches_explicit_padding() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let grid = randomize(9, 13, &mut rng).unwrap();
    let (h, w) = (grid.height(), grid.width());

    // Pad by one on every side with wrapped copies, step the padded grid
    // bounded, and compare the interior.
    let mut padded = Grid::new(h + 2, w + 2).unwrap();
    for row in 0..h + 2 {
        for col in 0..w + 2 {
            let alive = grid.get((row + h - 1) % h, (col + w - 1) % w);
            padded.set(row, col, alive).unwrap();
        }
    }
    let wrapped = step(&grid, BoundaryPolicy::Toroidal);
    let reference = step(&padded, BoundaryPolicy::Bounded);
    for row in 0..h {
        for col in 0..w {
            assert_eq!(wrapped.get(row, col), reference.get(row + 1, col + 1), "cell ({row}, {col})");
        }
    }
}

#[test]
fn failed_load_leaves_current_grid_alone() {
    let dir = tempdir().unwrap();
    let mut current = Grid::new(5, 5).unwrap();
    patterns::stamp(&mut current, patterns::find("glider").unwrap(), 2, 2);
    let before = current.clone();

    match snapshot::load(dir.path().join("missing.life")) {
        Ok(grid) => current = grid,
        Err(err) => assert!(matches!(err, SnapshotError::Io { .. })),
    }
    assert_eq!(current, before);
}

#[test]
fn evolved_grid_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gun.life");
    let mut grid = Grid::new(20, 40).unwrap();
    patterns::stamp(&mut grid, patterns::find("gosper glider gun").unwrap(), 10, 20);
    for _ in 0..30 {
        grid = step(&grid, BoundaryPolicy::Bounded);
    }

    snapshot::save(&grid, &path).unwrap();
    let loaded = snapshot::load(&path).unwrap();
    assert_eq!((loaded.height(), loaded.width()), (20, 40));
    assert_eq!(loaded, grid);
}

#[test]
fn cursor_edits_stay_on_grid() {
    let mut grid = Grid::new(3, 4).unwrap();
    let mut cursor = Cursor::centered(&grid);
    for direction in [Direction::Down; 10].into_iter().chain([Direction::Right; 10]) {
        cursor = cursor.moved(direction, &grid);
    }
    grid.set(cursor.row, cursor.col, true).unwrap();
    assert!(grid.get(2, 3));
    assert_eq!(grid.live_count(), 1);
}
