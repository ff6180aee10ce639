//! Concrete search domains.

pub mod grid;
pub mod labyrinth;
pub mod weighted;

pub use grid::{Cell, Connectivity, Grid, GridWorld};
pub use labyrinth::{reference_labyrinth, LABYRINTH_GOAL, LABYRINTH_START};
pub use weighted::{EdgeV1, WeightedGraph};
