use std::ops::Range;
use std::str::FromStr;

use log::debug;

use crate::error::AlmanacError;
use crate::stage::{MapRule, Stage};

/// Seeds plus the ordered stages that lead from a seed to its location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Almanac {
    pub seeds: Vec<u64>,
    pub stages: Vec<Stage>,
}

fn parse_numbers(text: &str, line: usize) -> Result<Vec<u64>, AlmanacError> {
    text.split_whitespace()
        .map(|token| {
            token.parse().map_err(|source| AlmanacError::BadNumber {
                line,
                token: token.to_owned(),
                source,
            })
        })
        .collect()
}

impl Almanac {
    /// Parse an almanac from its lines.
    ///
    /// The first line lists the seeds (`seeds: 79 14 55 13`). Every later
    /// non-blank line is either a map header (`seed-to-soil map:`) or a
    /// `destination source length` rule belonging to the latest header.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, AlmanacError> {
        let Some(seed_line) = lines.first().map(AsRef::as_ref) else {
            return Err(AlmanacError::MissingSeeds);
        };
        let Some(seed_text) = seed_line.trim().strip_prefix("seeds:") else {
            return Err(AlmanacError::MissingSeeds);
        };
        let seeds = parse_numbers(seed_text, 1)?;

        let mut stages: Vec<Stage> = Vec::new();
        for (i, line) in lines.iter().enumerate().skip(1) {
            let line = line.as_ref().trim();
            let lineno = i + 1;
            if line.is_empty() {
                continue;
            }
            if let Some(name) = line.strip_suffix("map:") {
                stages.push(Stage::new(name.trim()));
                continue;
            }
            let bad_rule = || AlmanacError::BadRule {
                line: lineno,
                text: line.to_owned(),
            };
            let Some(stage) = stages.last_mut() else {
                return Err(bad_rule());
            };
            let numbers = parse_numbers(line, lineno)?;
            let &[destination, source, len] = numbers.as_slice() else {
                return Err(bad_rule());
            };
            let rule = MapRule::checked(destination, source, len).ok_or_else(bad_rule)?;
            stage.rules.push(rule);
        }

        debug!("parsed almanac with {} seeds and {} stages", seeds.len(), stages.len());
        Ok(Self { seeds, stages })
    }

    /// Run one value through every stage.
    pub fn location(&self, seed: u64) -> u64 {
        self.stages.iter().fold(seed, |v, stage| stage.map(v))
    }

    /// The lowest location any listed seed ends up at.
    pub fn lowest_location(&self) -> Option<u64> {
        self.seeds.iter().map(|&s| self.location(s)).min()
    }

    /// The seeds read as `(start, length)` pairs. Zero-length pairs are
    /// dropped.
    pub fn seed_ranges(&self) -> Result<Vec<Range<u64>>, AlmanacError> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacError::OddSeedCount(self.seeds.len()));
        }
        Ok(self
            .seeds
            .chunks_exact(2)
            .filter(|pair| pair[1] > 0)
            .map(|pair| pair[0]..pair[0].saturating_add(pair[1]))
            .collect())
    }

    /// The lowest location reached by any seed in any seed range.
    pub fn lowest_location_for_ranges(&self) -> Result<Option<u64>, AlmanacError> {
        let mut intervals = self.seed_ranges()?;
        for stage in &self.stages {
            intervals = stage.map_intervals(intervals);
            debug!("{}: {} intervals", stage.name, intervals.len());
        }
        Ok(intervals.iter().map(|r| r.start).min())
    }
}

impl FromStr for Almanac {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        Self::from_lines(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    fn example() -> Almanac {
        EXAMPLE.parse().unwrap()
    }

    #[test]
    fn parses_seeds_and_stages() {
        let a = example();
        assert_eq!(a.seeds, vec![79, 14, 55, 13]);
        assert_eq!(a.stages.len(), 7);
        assert_eq!(a.stages[0].name, "seed-to-soil");
        assert_eq!(a.stages[2].rules.len(), 4);
        assert_eq!(a.stages[6].name, "humidity-to-location");
    }

    #[test]
    fn seeds_reach_their_locations() {
        let a = example();
        let locations: Vec<_> = a.seeds.iter().map(|&s| a.location(s)).collect();
        assert_eq!(locations, vec![82, 43, 86, 35]);
        assert_eq!(a.lowest_location(), Some(35));
    }

    #[test]
    fn seed_ranges_reach_lowest_location() {
        let a = example();
        assert_eq!(a.seed_ranges().unwrap(), vec![79..93, 55..68]);
        assert_eq!(a.lowest_location_for_ranges(), Ok(Some(46)));
    }

    #[test]
    fn no_seeds_means_no_location() {
        let a: Almanac = "seeds:\n\nx-to-y map:\n1 2 3".parse().unwrap();
        assert_eq!(a.lowest_location(), None);
        assert_eq!(a.lowest_location_for_ranges(), Ok(None));
    }

    #[test]
    fn missing_seed_line_is_rejected() {
        assert_eq!(
            "seed-to-soil map:\n1 2 3".parse::<Almanac>(),
            Err(AlmanacError::MissingSeeds)
        );
        assert_eq!("".parse::<Almanac>(), Err(AlmanacError::MissingSeeds));
    }

    #[test]
    fn bad_numbers_are_located() {
        let err = "seeds: 1 two".parse::<Almanac>().unwrap_err();
        assert!(matches!(
            err,
            AlmanacError::BadNumber { line: 1, ref token, .. } if token == "two"
        ));
    }

    #[test]
    fn rules_need_a_header_and_three_numbers() {
        assert_eq!(
            "seeds: 1\n\n1 2 3".parse::<Almanac>(),
            Err(AlmanacError::BadRule {
                line: 3,
                text: "1 2 3".into()
            })
        );
        assert_eq!(
            "seeds: 1\n\na-to-b map:\n1 2".parse::<Almanac>(),
            Err(AlmanacError::BadRule {
                line: 4,
                text: "1 2".into()
            })
        );
    }

    #[test]
    fn rules_past_u64_max_are_rejected() {
        assert_eq!(
            "seeds: 5\n\na-to-b map:\n18446744073709551615 0 10".parse::<Almanac>(),
            Err(AlmanacError::BadRule {
                line: 4,
                text: "18446744073709551615 0 10".into()
            })
        );
        let a: Almanac = "seeds: 5\n\na-to-b map:\n18446744073709551605 0 10".parse().unwrap();
        assert_eq!(a.location(5), u64::MAX - 5);
    }

    #[test]
    fn odd_seed_count_has_no_ranges() {
        let a: Almanac = "seeds: 1 2 3".parse().unwrap();
        assert_eq!(a.seed_ranges(), Err(AlmanacError::OddSeedCount(3)));
    }
}
