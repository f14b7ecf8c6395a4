use std::fmt;

use crucible_core::style::blue;
use crucible_core::{Direction, Point};

/// Parent index of the start state.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// One node of the search: a cell, how it was entered, and what it cost to
/// get there.
///
/// States live in the search arena and refer to their predecessor by index,
/// so the chain back to the start is always a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State {
    pub pos: Point,
    /// Arena index of the predecessor.
    pub(crate) parent: usize,
    /// Heat lost so far. The start cell is never charged.
    pub g: u32,
    /// Heuristic estimate of the remaining cost.
    pub h: u32,
    /// Direction of the last move, `None` for the start state.
    pub dir: Option<Direction>,
    /// Consecutive earlier moves in `dir`: 0 on the first move of a run.
    pub run: u8,
}

impl State {
    pub(crate) fn start(pos: Point, h: u32) -> Self {
        Self {
            pos,
            parent: NO_PARENT,
            g: 0,
            h,
            dir: None,
            run: 0,
        }
    }

    /// The state reached by stepping from `self` (stored at `idx`) onto
    /// `pos`, an adjacent cell costing `cost` to enter.
    pub(crate) fn child(&self, idx: usize, pos: Point, cost: u32, h: u32) -> Self {
        let dir = Direction::from_delta(pos - self.pos);
        let run = if dir.is_some() && dir == self.dir {
            self.run + 1
        } else {
            0
        };
        Self {
            pos,
            parent: idx,
            g: self.g + cost,
            h,
            dir,
            run,
        }
    }

    /// Estimated total cost, the ranking key of the frontier.
    #[inline]
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    /// Whether this is the start state.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent == NO_PARENT
    }

    /// Whether moving onto `next` keeps the straight run within
    /// `max_straight` cells. The start state accepts any first move.
    ///
    /// Reversal is not checked here; the search drops the parent cell from
    /// the candidates instead.
    pub fn accepts_step(&self, next: Point, max_straight: u8) -> bool {
        if self.is_root() {
            return true;
        }
        let same_dir = Direction::from_delta(next - self.pos) == self.dir;
        !(same_dir && self.run + 1 >= max_straight)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, (g, h, f): ({},{},{}))",
            blue("Sqr"),
            self.pos,
            self.g,
            self.h,
            self.f()
        )
    }
}
