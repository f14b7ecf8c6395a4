//! A digit cost grid for the heat-loss search.
//!
//! [`CostGrid`] stores one entry cost (0-9) per cell in a flat row-major
//! buffer, along with the precomputed heuristic table: the Manhattan
//! distance from each cell to the goal in the bottom-right corner. Both
//! are immutable once built, so a grid can be shared freely between
//! concurrent searches.

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::geom::{Bounds, Point};
use crate::style;

/// Errors raised while building or indexing a [`CostGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The input does not describe a rectangular grid of digits.
    #[error("malformed grid at line {line}: {reason}")]
    Malformed {
        /// 1-based input line the problem was found on.
        line: usize,
        reason: MalformedReason,
    },
    /// A coordinate outside the grid was looked up.
    #[error("{pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Point, width: i32, height: i32 },
}

/// Why an input was rejected as [`GridError::Malformed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("no rows")]
    Empty,
    #[error("expected {expected} columns, found {found}")]
    Ragged { expected: usize, found: usize },
    #[error("{0:?} is not a digit")]
    NotADigit(char),
}

/// A rectangular grid of per-cell entry costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    cells: Vec<u8>,
    heuristic: Vec<u32>,
    min_cost: u8,
    width: i32,
    height: i32,
}

impl CostGrid {
    /// Build a grid from rows of ASCII digits.
    ///
    /// Every row must have the same, non-zero length. Callers are expected
    /// to strip trailing blank lines first (see [`crate::read_lines`]).
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, GridError> {
        let Some(first) = lines.first() else {
            return Err(GridError::Malformed {
                line: 1,
                reason: MalformedReason::Empty,
            });
        };
        let width = first.as_ref().chars().count();
        let mut cells = Vec::with_capacity(width * lines.len());

        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width || found == 0 {
                let reason = if width == 0 {
                    MalformedReason::Empty
                } else {
                    MalformedReason::Ragged {
                        expected: width,
                        found,
                    }
                };
                return Err(GridError::Malformed { line: i + 1, reason });
            }
            for c in line.chars() {
                let digit = c.to_digit(10).ok_or(GridError::Malformed {
                    line: i + 1,
                    reason: MalformedReason::NotADigit(c),
                })?;
                cells.push(digit as u8);
            }
        }

        Ok(Self::from_cells(cells, width as i32, lines.len() as i32))
    }

    fn from_cells(cells: Vec<u8>, width: i32, height: i32) -> Self {
        let bounds = Bounds::new(width, height);
        let heuristic = bounds
            .cells()
            .map(|p| bounds.distance_to_corner(p))
            .collect();
        let min_cost = cells.iter().copied().min().unwrap_or(0);
        debug!("built {width}x{height} cost grid, cheapest cell {min_cost}");
        Self {
            cells,
            heuristic,
            min_cost,
            width,
            height,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Cost of the cheapest cell.
    #[inline]
    pub fn min_cost(&self) -> u8 {
        self.min_cost
    }

    /// The start cell, always the top-left corner.
    #[inline]
    pub fn start(&self) -> Point {
        Point::ZERO
    }

    /// The goal cell, always the bottom-right corner.
    #[inline]
    pub fn goal(&self) -> Point {
        self.bounds().corner()
    }

    /// Whether `p` lies inside the grid. No wraparound.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    fn index(&self, p: Point) -> Result<usize, GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds {
                pos: p,
                width: self.width,
                height: self.height,
            });
        }
        Ok((p.y * self.width + p.x) as usize)
    }

    /// Cost of entering the cell at `p`.
    pub fn entry_cost(&self, p: Point) -> Result<u8, GridError> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Manhattan distance `(width-1-x) + (height-1-y)` from `p` to
    /// [`goal`](Self::goal).
    ///
    /// This only bounds the remaining cost from below when every cell costs
    /// at least 1; check [`min_cost`](Self::min_cost) before using it as a
    /// search estimate.
    pub fn heuristic(&self, p: Point) -> Result<u32, GridError> {
        self.index(p).map(|i| self.heuristic[i])
    }

    /// Iterate over `(Point, cost)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        self.bounds().cells().zip(self.cells.iter().copied())
    }

    /// The grid rendered between two horizontal rules, one tab-indented
    /// row per line.
    pub fn framed(&self) -> String {
        let body = self
            .to_string()
            .lines()
            .map(|l| format!("\t{l}"))
            .collect::<Vec<_>>()
            .join("\n");
        style::pad_with_rules(&body)
    }
}

impl FromStr for CostGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.trim_end().lines().collect();
        Self::from_lines(&lines)
    }
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
