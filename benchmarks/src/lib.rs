//! Shared helpers for waypoint benchmark suites.

use waypoint_harness::worlds::grid::{Cell, Grid};

/// Grid size regimes used by the macro benchmarks.
#[derive(Debug, Clone, Copy)]
pub enum Regime {
    Small,
    Medium,
    Large,
}

impl Regime {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub fn side(self) -> usize {
        match self {
            Self::Small => 32,
            Self::Medium => 128,
            Self::Large => 384,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Square serpentine maze: every fourth row is a wall with a single gap,
/// alternating between the right and left edges.
///
/// Returns the grid plus the top-left and bottom-left corners as
/// start and goal.
///
/// # Panics
///
/// If `side` exceeds the grid cell cap.
#[must_use]
pub fn serpentine(side: usize) -> (Grid, Cell, Cell) {
    let mut grid = Grid::new(side, side).expect("regime grid fits the cell cap");
    let last = i64::try_from(side).expect("side fits in i64") - 1;
    let mut gap_right = true;
    for row in (2..last).step_by(4) {
        for col in 0..=last {
            let gap = if gap_right { last } else { 0 };
            if col != gap {
                grid.set_obstacle(Cell::new(row, col))
                    .expect("wall cell is in bounds");
            }
        }
        gap_right = !gap_right;
    }
    (grid, Cell::new(0, 0), Cell::new(last, 0))
}

/// Open grid with a scattering of single-cell obstacles on a fixed lattice.
///
/// # Panics
///
/// If `side` exceeds the grid cell cap.
#[must_use]
pub fn pillars(side: usize) -> (Grid, Cell, Cell) {
    let mut grid = Grid::new(side, side).expect("regime grid fits the cell cap");
    let last = i64::try_from(side).expect("side fits in i64") - 1;
    for row in (3..last).step_by(5) {
        for col in (row % 7 + 1..last).step_by(6) {
            grid.set_obstacle(Cell::new(row, col))
                .expect("pillar cell is in bounds");
        }
    }
    (grid, Cell::new(0, 0), Cell::new(last, last))
}
