use std::collections::HashMap;

use log::debug;

use crate::error::WorkflowError;
use crate::part::{Category, Part};
use crate::rule::{Comparison, Rule, Target, Workflow};

/// Name of the workflow every part starts in.
pub const ENTRY: &str = "in";

/// An axis-aligned box of ratings, inclusive on both ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RatingBox {
    lo: [u32; 4],
    hi: [u32; 4],
}

impl RatingBox {
    /// Every category spans `lo..=hi`.
    pub const fn uniform(lo: u32, hi: u32) -> Self {
        Self {
            lo: [lo; 4],
            hi: [hi; 4],
        }
    }

    /// Number of distinct parts inside the box, or `None` if that does not
    /// fit in a `u64`.
    pub fn volume(&self) -> Option<u64> {
        self.lo.iter().zip(&self.hi).try_fold(1_u64, |acc, (&lo, &hi)| {
            let side = if hi < lo { 0 } else { u64::from(hi - lo) + 1 };
            acc.checked_mul(side)
        })
    }

    fn is_empty(&self) -> bool {
        self.lo.iter().zip(&self.hi).any(|(lo, hi)| hi < lo)
    }

    fn with_bounds(mut self, c: Category, lo: u32, hi: u32) -> Option<Self> {
        self.lo[c.index()] = lo;
        self.hi[c.index()] = hi;
        (!self.is_empty()).then_some(self)
    }

    /// Split into the part matching `rule` and the part that falls through.
    pub fn split(self, rule: &Rule) -> (Option<Self>, Option<Self>) {
        let i = rule.category.index();
        let (lo, hi, t) = (self.lo[i], self.hi[i], rule.threshold);
        match rule.cmp {
            Comparison::Less => (
                t.checked_sub(1)
                    .and_then(|below| self.with_bounds(rule.category, lo, hi.min(below))),
                self.with_bounds(rule.category, lo.max(t), hi),
            ),
            Comparison::Greater => (
                t.checked_add(1)
                    .and_then(|above| self.with_bounds(rule.category, lo.max(above), hi)),
                self.with_bounds(rule.category, lo, hi.min(t)),
            ),
        }
    }
}

/// A complete, validated set of workflows.
#[derive(Clone, Debug, Default)]
pub struct System {
    workflows: HashMap<String, Workflow>,
}

impl System {
    /// Build a system, checking that names are unique, that [`ENTRY`]
    /// exists and that every target names a defined workflow.
    pub fn new(defs: impl IntoIterator<Item = Workflow>) -> Result<Self, WorkflowError> {
        let mut workflows = HashMap::new();
        for w in defs {
            if let Some(prev) = workflows.insert(w.name.clone(), w) {
                return Err(WorkflowError::Duplicate(prev.name));
            }
        }
        if !workflows.contains_key(ENTRY) {
            return Err(WorkflowError::MissingEntry);
        }
        for w in workflows.values() {
            for target in w.targets() {
                if let Target::Workflow(name) = target {
                    if !workflows.contains_key(name) {
                        return Err(WorkflowError::UnknownWorkflow(name.clone()));
                    }
                }
            }
        }
        debug!("built workflow system with {} workflows", workflows.len());
        Ok(Self { workflows })
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Workflow> {
        self.workflows.get(name)
    }

    fn lookup(&self, name: &str) -> Result<&Workflow, WorkflowError> {
        self.get(name)
            .ok_or_else(|| WorkflowError::UnknownWorkflow(name.to_owned()))
    }

    /// Sort `part`, starting at [`ENTRY`].
    pub fn accepts(&self, part: &Part) -> Result<bool, WorkflowError> {
        let mut current = ENTRY;
        // An acyclic system visits each workflow at most once.
        for _ in 0..=self.workflows.len() {
            match self.lookup(current)?.route(part) {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(next) => current = next.as_str(),
            }
        }
        Err(WorkflowError::Cycle(current.to_owned()))
    }

    /// Sum of all ratings of every accepted part.
    pub fn accepted_rating_sum(&self, parts: &[Part]) -> Result<u64, WorkflowError> {
        let mut total = 0;
        for part in parts {
            if self.accepts(part)? {
                total += part.total();
            }
        }
        Ok(total)
    }

    /// How many distinct parts with every rating in `lo..=hi` are accepted.
    ///
    /// Fails with [`WorkflowError::Overflow`] when the count does not fit in
    /// a `u64`, which happens once the bounds span 2^16 values or more.
    pub fn accepted_combinations(&self, lo: u32, hi: u32) -> Result<u64, WorkflowError> {
        let overflow = || WorkflowError::Overflow { lo, hi };
        let mut total: u64 = 0;
        let mut accept = |b: RatingBox| -> Result<(), WorkflowError> {
            let volume = b.volume().ok_or_else(overflow)?;
            total = total.checked_add(volume).ok_or_else(overflow)?;
            Ok(())
        };
        let mut pending = vec![(ENTRY, RatingBox::uniform(lo, hi), 0_usize)];

        while let Some((name, start, depth)) = pending.pop() {
            if depth > self.workflows.len() {
                return Err(WorkflowError::Cycle(name.to_owned()));
            }
            let workflow = self.lookup(name)?;
            let mut rest = Some(start);
            for rule in &workflow.rules {
                let Some(current) = rest else { break };
                let (hit, miss) = current.split(rule);
                if let Some(hit) = hit {
                    match &rule.target {
                        Target::Accept => accept(hit)?,
                        Target::Reject => {}
                        Target::Workflow(next) => pending.push((next.as_str(), hit, depth + 1)),
                    }
                }
                rest = miss;
            }
            if let Some(current) = rest {
                match &workflow.fallback {
                    Target::Accept => accept(current)?,
                    Target::Reject => {}
                    Target::Workflow(next) => pending.push((next.as_str(), current, depth + 1)),
                }
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn system(lines: &[&str]) -> Result<System, WorkflowError> {
        System::new(lines.iter().map(|l| Workflow::parse(l).unwrap()))
    }

    fn rule(category: Category, cmp: Comparison, threshold: u32) -> Rule {
        Rule {
            category,
            cmp,
            threshold,
            target: Target::Accept,
        }
    }

    #[test]
    fn uniform_box_volume() {
        assert_eq!(RatingBox::uniform(1, 4000).volume(), Some(4000_u64.pow(4)));
        assert_eq!(RatingBox::uniform(3, 3).volume(), Some(1));
        assert_eq!(RatingBox::uniform(4, 3).volume(), Some(0));
        assert_eq!(RatingBox::uniform(0, u32::MAX).volume(), None);
    }

    #[rstest]
    #[case(Comparison::Less, 2006, 2005, 1995)]
    #[case(Comparison::Greater, 2090, 1910, 2090)]
    #[case(Comparison::Less, 1, 0, 4000)]
    #[case(Comparison::Greater, 4000, 0, 4000)]
    fn split_partitions_one_axis(
        #[case] cmp: Comparison,
        #[case] threshold: u32,
        #[case] hit_len: u64,
        #[case] miss_len: u64,
    ) {
        let b = RatingBox::uniform(1, 4000);
        let (hit, miss) = b.split(&rule(Category::M, cmp, threshold));
        let cross = 4000_u64.pow(3);
        assert_eq!(hit.and_then(|h| h.volume()).unwrap_or(0), hit_len * cross);
        assert_eq!(miss.and_then(|m| m.volume()).unwrap_or(0), miss_len * cross);
    }

    #[test]
    fn missing_entry_is_rejected() {
        assert_eq!(system(&["px{A}"]).unwrap_err(), WorkflowError::MissingEntry);
    }

    #[test]
    fn dangling_targets_are_rejected() {
        assert_eq!(
            system(&["in{x<5:nope,A}"]).unwrap_err(),
            WorkflowError::UnknownWorkflow("nope".into())
        );
    }

    #[test]
    fn cycles_are_detected() {
        let s = system(&["in{x<5:a,A}", "a{b}", "b{a}"]).unwrap();
        assert!(matches!(s.accepts(&Part::new(1, 1, 1, 1)), Err(WorkflowError::Cycle(_))));
        assert_eq!(s.accepts(&Part::new(9, 1, 1, 1)), Ok(true));
        assert!(matches!(s.accepted_combinations(1, 10), Err(WorkflowError::Cycle(_))));
    }

    #[test]
    fn accept_all_counts_whole_box() {
        let s = system(&["in{A}"]).unwrap();
        assert_eq!(s.accepted_combinations(1, 10), Ok(10_000));
    }

    #[test]
    fn full_u32_ratings_overflow() {
        let s = system(&["in{A}"]).unwrap();
        assert_eq!(
            s.accepted_combinations(0, u32::MAX),
            Err(WorkflowError::Overflow {
                lo: 0,
                hi: u32::MAX
            })
        );
        assert_eq!(s.accepted_combinations(1, 65_535), Ok(65_535_u64.pow(4)));
    }

    #[test]
    fn overflow_across_accepting_branches() {
        // Each half fits on its own; their sum does not.
        let s = system(&["in{x<32769:A,A}"]).unwrap();
        assert!(matches!(
            s.accepted_combinations(1, 65_536),
            Err(WorkflowError::Overflow { .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        assert_eq!(
            system(&["in{A}", "px{R}", "px{A}"]).unwrap_err(),
            WorkflowError::Duplicate("px".into())
        );
    }

    #[test]
    fn single_rule_counts_half_space() {
        let s = system(&["in{x<6:A,R}"]).unwrap();
        assert_eq!(s.accepted_combinations(1, 10), Ok(5 * 1000));
    }
}
