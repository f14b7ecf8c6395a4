//! Grid coordinates and moves.
//!
//! `x` is the column and `y` the row, so the top-left cell is `(0, 0)` and
//! `y` grows downwards.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell coordinate, or the offset between two cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one move away in direction `d`. May fall off the grid.
    #[inline]
    pub const fn step(self, d: Direction) -> Self {
        let delta = d.delta();
        Self::new(self.x + delta.x, self.y + delta.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One of the four moves a crucible can make.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    /// Every direction, in the order successors are generated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
            Direction::Down => Point::new(0, 1),
        }
    }

    /// The move that produces `delta`, or `None` unless it is a unit
    /// cardinal offset.
    #[inline]
    pub const fn from_delta(delta: Point) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            _ => None,
        }
    }

    /// The move that undoes this one.
    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }
}

/// The cells of a `width` x `height` grid anchored at the origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether `p` is a cell of the grid. No wraparound.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// The bottom-right cell. Meaningless for an empty grid.
    #[inline]
    pub const fn corner(self) -> Point {
        Point::new(self.width - 1, self.height - 1)
    }

    /// Manhattan distance from `p` to [`corner`](Self::corner).
    #[inline]
    pub fn distance_to_corner(self, p: Point) -> u32 {
        let c = self.corner();
        c.x.abs_diff(p.x) + c.y.abs_diff(p.y)
    }

    /// Every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Point> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}
