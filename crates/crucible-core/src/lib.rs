//! **crucible-core**: shared building blocks for the crucible puzzle solvers.
//!
//! This crate provides the types every solver leans on: geometry
//! primitives ([`Point`], [`Direction`], [`Bounds`]), the digit
//! [`CostGrid`] used by the heat-loss search, a line reader for puzzle
//! inputs, and a handful of console formatting helpers.

pub mod geom;
pub mod grid;
pub mod input;
pub mod style;

pub use geom::{Bounds, Direction, Point};
pub use grid::{CostGrid, GridError};
pub use input::{InputError, read_lines};
pub use style::Color;
