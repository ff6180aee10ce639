//! The reference labyrinth: a 10x20 grid with an L-shaped wall plus one
//! extra block, searched from (5, 5) to (8, 8).
//!
//! ```text
//!    col 0         1
//!        01234567890123456789
//!  0     ....................
//!  1     ....................
//!  2     ......##............
//!  3     ......#.............
//!  4     ......#.............
//!  5     ......#.............
//!  6     ..#####.............
//!  7     ....................
//!  8     ....................
//!  9     ....................
//! ```
//!
//! Start (5, 5) sits inside the corner of the wall, so although the goal
//! is only 6 steps away by Manhattan distance, every 4-connected route has
//! to go around the wall: the shortest costs 14.

use super::grid::{Cell, Grid};
use crate::error::Result;

pub const LABYRINTH_HEIGHT: usize = 10;
pub const LABYRINTH_WIDTH: usize = 20;

pub const LABYRINTH_START: Cell = Cell::new(5, 5);
pub const LABYRINTH_GOAL: Cell = Cell::new(8, 8);

/// Cost of the optimal 4-connected route from start to goal.
pub const LABYRINTH_OPTIMAL_COST: f64 = 14.0;

/// Free cells reachable from the start (every free cell).
pub const LABYRINTH_REACHABLE: usize = 190;

/// Blocked cells in insertion order.
#[must_use]
pub fn labyrinth_obstacles() -> Vec<Cell> {
    let mut cells = Vec::with_capacity(11);
    for r in 2..7 {
        cells.push(Cell::new(r, 6));
        cells.push(Cell::new(6, r));
    }
    cells.push(Cell::new(2, 7));
    cells
}

/// Build the reference labyrinth grid.
///
/// # Errors
///
/// Never in practice; the obstacle list is in bounds by construction.
pub fn reference_labyrinth() -> Result<Grid> {
    Grid::with_obstacles(LABYRINTH_HEIGHT, LABYRINTH_WIDTH, labyrinth_obstacles())
}
