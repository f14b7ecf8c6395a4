use crucible_core::{CostGrid, GridError, Point};

/// Everything the heat-loss search needs to know about a grid.
pub trait HeatMap {
    /// Whether `p` is a cell of the map.
    fn contains(&self, p: Point) -> bool;

    /// Cost charged for entering `p`.
    fn entry_cost(&self, p: Point) -> Result<u32, GridError>;

    /// Lower bound on the cost from `p` to [`goal`](Self::goal).
    /// Must never overestimate (admissible).
    fn estimate(&self, p: Point) -> Result<u32, GridError>;

    /// Where every route starts.
    fn start(&self) -> Point;

    /// Where every route ends.
    fn goal(&self) -> Point;
}

impl HeatMap for CostGrid {
    #[inline]
    fn contains(&self, p: Point) -> bool {
        CostGrid::contains(self, p)
    }

    #[inline]
    fn entry_cost(&self, p: Point) -> Result<u32, GridError> {
        CostGrid::entry_cost(self, p).map(u32::from)
    }

    /// Manhattan distance to the goal, or zero everywhere on a grid with a
    /// free cell, where the step count could overestimate.
    #[inline]
    fn estimate(&self, p: Point) -> Result<u32, GridError> {
        let h = self.heuristic(p)?;
        Ok(if self.min_cost() == 0 { 0 } else { h })
    }

    #[inline]
    fn start(&self) -> Point {
        CostGrid::start(self)
    }

    #[inline]
    fn goal(&self) -> Point {
        CostGrid::goal(self)
    }
}
