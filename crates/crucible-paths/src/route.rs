use crucible_core::{Direction, Point};

/// A finished route: the heat lost along it and every cell visited, start
/// first and goal last.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub cost: u32,
    pub path: Vec<Point>,
}

impl Route {
    /// Number of moves along the route.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the route has no moves (start and goal coincide).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The direction of each move, or `None` for a pair of cells that are
    /// not adjacent.
    pub fn steps(&self) -> impl Iterator<Item = Option<Direction>> + '_ {
        self.path
            .windows(2)
            .map(|w| Direction::from_delta(w[1] - w[0]))
    }

    /// Length of the longest run of identical consecutive moves.
    pub fn longest_run(&self) -> usize {
        let mut best = 0;
        let mut cur = 0;
        let mut prev = None;
        for step in self.steps() {
            cur = if step.is_some() && step == prev { cur + 1 } else { 1 };
            best = best.max(cur);
            prev = step;
        }
        best
    }

    /// Whether the route ever turns straight back on itself.
    pub fn reverses(&self) -> bool {
        self.steps()
            .zip(self.steps().skip(1))
            .any(|(a, b)| matches!((a, b), (Some(a), Some(b)) if a.reverse() == b))
    }

    /// Whether every consecutive pair of cells is one cardinal step apart.
    pub fn is_contiguous(&self) -> bool {
        self.steps().all(|s| s.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(points: &[(i32, i32)]) -> Route {
        Route {
            cost: 0,
            path: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    #[test]
    fn single_cell_route_is_empty() {
        let r = route(&[(0, 0)]);
        assert!(r.is_empty());
        assert_eq!(r.longest_run(), 0);
        assert!(r.is_contiguous());
        assert!(!r.reverses());
    }

    #[test]
    fn longest_run_counts_straight_moves() {
        let r = route(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);
        assert_eq!(r.len(), 6);
        assert_eq!(r.longest_run(), 4);
        assert!(r.is_contiguous());
    }

    #[test]
    fn detects_reversal_and_gaps() {
        assert!(route(&[(0, 0), (1, 0), (0, 0)]).reverses());
        assert!(!route(&[(0, 0), (1, 0), (1, 1)]).reverses());
        assert!(!route(&[(0, 0), (2, 0)]).is_contiguous());
    }
}
