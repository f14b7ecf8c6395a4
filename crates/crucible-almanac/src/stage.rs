use std::ops::Range;

/// Shifts every value in `source` onto the interval starting at
/// `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRule {
    pub source: Range<u64>,
    pub destination: u64,
}

impl MapRule {
    /// Build a rule from the `destination source length` triple used by
    /// almanac files.
    ///
    /// `len` is clamped so that neither interval runs past `u64::MAX`.
    pub fn new(destination: u64, source: u64, len: u64) -> Self {
        let len = len.min(u64::MAX - source).min(u64::MAX - destination);
        Self {
            source: source..source + len,
            destination,
        }
    }

    /// Like [`new`](Self::new), but `None` instead of clamping when either
    /// interval would run past `u64::MAX`.
    pub fn checked(destination: u64, source: u64, len: u64) -> Option<Self> {
        source.checked_add(len)?;
        destination.checked_add(len)?;
        Some(Self::new(destination, source, len))
    }

    /// Whether `value` falls inside the source interval.
    #[inline]
    pub fn covers(&self, value: u64) -> bool {
        self.source.contains(&value)
    }

    /// Translate a covered value. The caller checks [`covers`](Self::covers);
    /// the clamp in [`new`](Self::new) keeps the sum in range.
    #[inline]
    fn translate(&self, value: u64) -> u64 {
        self.destination + (value - self.source.start)
    }
}

/// One step of the pipeline, e.g. `seed-to-soil`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    pub name: String,
    pub rules: Vec<MapRule>,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Map a single value: the first covering rule wins, anything else
    /// passes through.
    pub fn map(&self, value: u64) -> u64 {
        self.rules
            .iter()
            .find(|r| r.covers(value))
            .map_or(value, |r| r.translate(value))
    }

    /// Map a set of half-open intervals, splitting each one wherever it
    /// crosses a rule boundary. Uncovered pieces pass through unchanged.
    pub fn map_intervals(&self, inputs: Vec<Range<u64>>) -> Vec<Range<u64>> {
        let mut pending = inputs;
        let mut mapped = Vec::new();
        for rule in &self.rules {
            let mut rest = Vec::new();
            for r in pending {
                let lo = r.start.max(rule.source.start);
                let hi = r.end.min(rule.source.end);
                if lo >= hi {
                    rest.push(r);
                    continue;
                }
                let start = rule.translate(lo);
                mapped.push(start..start + (hi - lo));
                if r.start < lo {
                    rest.push(r.start..lo);
                }
                if hi < r.end {
                    rest.push(hi..r.end);
                }
            }
            pending = rest;
        }
        mapped.extend(pending);
        mapped
    }
}
