//! Occupancy grid world.
//!
//! A [`Grid`] is a caller-owned rectangle of free and blocked cells. A
//! [`GridWorld`] borrows one and exposes it to the search engine as a
//! 4- or 8-connected graph.
//!
//! # Text format
//!
//! One line per row, one glyph per column: `.` free, `#` blocked. Leading
//! and trailing blank lines and surrounding whitespace are ignored.
//!
//! ```text
//! ....
//! .##.
//! ....
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use waypoint_search::contract::SearchDomain;
use waypoint_search::heuristic::PlanarState;

use crate::error::{HarnessError, Result};

/// A grid coordinate, row-major ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Cell {
    pub row: i64,
    pub col: i64,
}

impl Cell {
    #[must_use]
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The cell `d_row, d_col` away, or `None` if a coordinate overflows.
    #[must_use]
    pub fn offset(self, d_row: i64, d_col: i64) -> Option<Self> {
        Some(Self::new(
            self.row.checked_add(d_row)?,
            self.col.checked_add(d_col)?,
        ))
    }
}

impl From<[i64; 2]> for Cell {
    fn from([row, col]: [i64; 2]) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for [i64; 2] {
    fn from(cell: Cell) -> Self {
        [cell.row, cell.col]
    }
}

impl From<(i64, i64)> for Cell {
    fn from((row, col): (i64, i64)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PlanarState for Cell {
    fn coords(&self) -> (i64, i64) {
        (self.row, self.col)
    }
}

/// Largest grid (in cells) that may be allocated.
pub const MAX_GRID_CELLS: usize = 1 << 26;

const FREE_GLYPH: char = '.';
const BLOCKED_GLYPH: char = '#';

/// Rectangular occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    blocked: Vec<bool>,
}

impl Grid {
    /// An obstacle-free grid.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::GridTooLarge`] if `height * width` overflows or
    /// exceeds [`MAX_GRID_CELLS`].
    pub fn new(height: usize, width: usize) -> Result<Self> {
        let cells = height
            .checked_mul(width)
            .filter(|&n| n <= MAX_GRID_CELLS)
            .ok_or(HarnessError::GridTooLarge { height, width })?;
        Ok(Self {
            height,
            width,
            blocked: vec![false; cells],
        })
    }

    /// A grid with the given cells blocked.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::GridTooLarge`] for oversized dimensions and
    /// [`HarnessError::OutOfBounds`] for the first obstacle outside the grid.
    pub fn with_obstacles<I>(height: usize, width: usize, obstacles: I) -> Result<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Self::new(height, width)?;
        for cell in obstacles {
            grid.set_obstacle(cell)?;
        }
        Ok(grid)
    }

    /// Parse the text format described in the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::GridParse`] for an empty map, ragged rows or an
    /// unknown glyph.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .skip_while(|l| l.is_empty())
            .collect();
        let rows = match rows.iter().rposition(|l| !l.is_empty()) {
            Some(last) => &rows[..=last],
            None => {
                return Err(HarnessError::GridParse {
                    line: 0,
                    detail: "map is empty".into(),
                })
            }
        };

        let width = rows[0].chars().count();
        let mut blocked = Vec::with_capacity(rows.len() * width);
        for (line, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(HarnessError::GridParse {
                    line: line + 1,
                    detail: format!(
                        "row has {} columns, expected {width}",
                        row.chars().count()
                    ),
                });
            }
            for glyph in row.chars() {
                match glyph {
                    FREE_GLYPH => blocked.push(false),
                    BLOCKED_GLYPH => blocked.push(true),
                    other => {
                        return Err(HarnessError::GridParse {
                            line: line + 1,
                            detail: format!("unknown glyph {other:?}"),
                        })
                    }
                }
            }
        }

        Ok(Self {
            height: rows.len(),
            width,
            blocked,
        })
    }

    /// Inverse of [`Grid::from_ascii`].
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for row in self.blocked.chunks(self.width.max(1)) {
            out.extend(
                row.iter()
                    .map(|&b| if b { BLOCKED_GLYPH } else { FREE_GLYPH }),
            );
            out.push('\n');
        }
        out
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    fn cell_at(&self, index: usize) -> Cell {
        let row = i64::try_from(index / self.width).unwrap_or(i64::MAX);
        let col = i64::try_from(index % self.width).unwrap_or(i64::MAX);
        Cell::new(row, col)
    }

    fn out_of_bounds(&self, cell: Cell) -> HarnessError {
        HarnessError::OutOfBounds {
            row: cell.row,
            col: cell.col,
            height: self.height,
            width: self.width,
        }
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Whether an in-bounds cell is blocked. Out-of-bounds cells are not obstacles.
    #[must_use]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.blocked[i])
    }

    /// In bounds and not blocked.
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| !self.blocked[i])
    }

    /// Block a cell.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::OutOfBounds`] if the cell is outside the grid.
    pub fn set_obstacle(&mut self, cell: Cell) -> Result<()> {
        let i = self.index(cell).ok_or_else(|| self.out_of_bounds(cell))?;
        self.blocked[i] = true;
        Ok(())
    }

    /// Unblock a cell.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::OutOfBounds`] if the cell is outside the grid.
    pub fn clear_obstacle(&mut self, cell: Cell) -> Result<()> {
        let i = self.index(cell).ok_or_else(|| self.out_of_bounds(cell))?;
        self.blocked[i] = false;
        Ok(())
    }

    /// Blocked cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| self.cell_at(i))
    }

    /// Free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| !b)
            .map(|(i, _)| self.cell_at(i))
    }
}

/// Movement model on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Up, down, left, right at cost 1.
    #[default]
    Four,
    /// The four orthogonal moves plus diagonals at cost √2. A diagonal is
    /// allowed only if both orthogonal cells it squeezes between are free.
    Eight,
}

/// Orthogonal moves in expansion order: up, down, left, right.
const ORTHOGONAL: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(i64, i64); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A grid exposed as a search domain.
#[derive(Debug, Clone, Copy)]
pub struct GridWorld<'g> {
    grid: &'g Grid,
    connectivity: Connectivity,
}

impl<'g> GridWorld<'g> {
    #[must_use]
    pub fn new(grid: &'g Grid, connectivity: Connectivity) -> Self {
        Self { grid, connectivity }
    }

    /// 4-connected view of `grid`.
    #[must_use]
    pub fn four_connected(grid: &'g Grid) -> Self {
        Self::new(grid, Connectivity::Four)
    }
}

impl SearchDomain for GridWorld<'_> {
    type State = Cell;

    fn neighbors(&self, state: &Cell) -> Vec<(Cell, f64)> {
        let free = |dr: i64, dc: i64| state.offset(dr, dc).filter(|&c| self.grid.is_free(c));

        let mut out: Vec<(Cell, f64)> = ORTHOGONAL
            .iter()
            .filter_map(|&(dr, dc)| free(dr, dc))
            .map(|c| (c, 1.0))
            .collect();

        if self.connectivity == Connectivity::Eight {
            out.extend(DIAGONAL.iter().filter_map(|&(dr, dc)| {
                let target = free(dr, dc)?;
                free(dr, 0)?;
                free(0, dc)?;
                Some((target, std::f64::consts::SQRT_2))
            }));
        }
        out
    }

    fn validate_state(&self, state: &Cell) -> std::result::Result<(), String> {
        if !self.grid.contains(*state) {
            return Err(format!(
                "cell {state} is outside the {}x{} grid",
                self.grid.height(),
                self.grid.width()
            ));
        }
        if self.grid.is_obstacle(*state) {
            return Err(format!("cell {state} is an obstacle"));
        }
        Ok(())
    }
}
