use crucible_core::{Direction, Point};

/// Cached neighbour computation helper.
///
/// Enumerates the cardinal neighbours of a cell, in [`Direction::ALL`]
/// order, filtered by a predicate. The buffer is reused between calls.
#[derive(Debug, Default)]
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the 4-directional neighbours of `p`, keeping only those for
    /// which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for d in Direction::ALL {
            let n = p.step(d);
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_filters_and_keeps_order() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Point::new(0, 0), |n| n.x >= 0 && n.y >= 0);
        assert_eq!(got, &[Point::new(1, 0), Point::new(0, 1)]);

        let got = nb.cardinal(Point::new(3, 3), |_| true);
        assert_eq!(
            got,
            &[
                Point::new(3, 2),
                Point::new(2, 3),
                Point::new(4, 3),
                Point::new(3, 4)
            ]
        );
    }
}
