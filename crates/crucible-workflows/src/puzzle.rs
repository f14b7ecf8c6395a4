use std::collections::HashSet;
use std::str::FromStr;

use crate::error::WorkflowError;
use crate::part::Part;
use crate::rule::Workflow;
use crate::system::System;

/// A parsed input file: the workflows, then the parts to sort.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub system: System,
    pub parts: Vec<Part>,
}

impl Puzzle {
    /// Parse workflow lines up to the first blank line and part lines after
    /// it. An input without a blank line has no parts.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, WorkflowError> {
        let syntax = |i: usize, text: &str, message| WorkflowError::Syntax {
            line: i + 1,
            text: text.to_owned(),
            message,
        };

        let split = lines
            .iter()
            .position(|l| l.as_ref().trim().is_empty())
            .unwrap_or(lines.len());
        let (workflow_lines, part_lines) = lines.split_at(split);

        let workflows = workflow_lines
            .iter()
            .enumerate()
            .map(|(i, l)| Workflow::parse(l.as_ref()).map_err(|m| syntax(i, l.as_ref(), m)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for (i, w) in workflows.iter().enumerate() {
            if !seen.insert(w.name.as_str()) {
                return Err(syntax(
                    i,
                    workflow_lines[i].as_ref(),
                    "workflow name already defined",
                ));
            }
        }

        let parts = part_lines
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.as_ref().trim().is_empty())
            .map(|(i, l)| {
                l.as_ref()
                    .parse::<Part>()
                    .map_err(|m| syntax(split + i, l.as_ref(), m))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            system: System::new(workflows)?,
            parts,
        })
    }

    /// Sum of the ratings of every accepted part.
    pub fn accepted_rating_sum(&self) -> Result<u64, WorkflowError> {
        self.system.accepted_rating_sum(&self.parts)
    }
}

impl FromStr for Puzzle {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        Self::from_lines(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}

{x=787,m=2655,a=1222,s=2876}
{x=1679,m=44,a=2067,s=496}
{x=2036,m=264,a=79,s=2244}
{x=2461,m=1339,a=466,s=291}
{x=2127,m=1623,a=2188,s=1013}
";

    #[test]
    fn parses_example() {
        let p: Puzzle = EXAMPLE.parse().unwrap();
        assert_eq!(p.system.len(), 11);
        assert_eq!(p.parts.len(), 5);
        assert_eq!(p.parts[1], Part::new(1679, 44, 2067, 496));
    }

    #[test]
    fn sorts_example_parts() {
        let p: Puzzle = EXAMPLE.parse().unwrap();
        let accepted: Vec<bool> = p
            .parts
            .iter()
            .map(|part| p.system.accepts(part).unwrap())
            .collect();
        assert_eq!(accepted, vec![true, false, true, false, true]);
        assert_eq!(p.accepted_rating_sum(), Ok(19114));
    }

    #[test]
    fn counts_example_combinations() {
        let p: Puzzle = EXAMPLE.parse().unwrap();
        assert_eq!(p.system.accepted_combinations(1, 4000), Ok(167_409_079_868_000));
    }

    #[test]
    fn syntax_errors_carry_line_numbers() {
        let err = "in{A}\n\n{x=1,m=2}".parse::<Puzzle>().unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Syntax {
                line: 3,
                text: "{x=1,m=2}".into(),
                message: "part is missing a rating category",
            }
        );

        let err = "in{A}\npx{a<:A,R}".parse::<Puzzle>().unwrap_err();
        assert!(matches!(err, WorkflowError::Syntax { line: 2, .. }));
    }

    #[test]
    fn repeated_workflow_names_are_syntax_errors() {
        let err = "in{px}\npx{A}\npx{R}\n\n{x=1,m=1,a=1,s=1}"
            .parse::<Puzzle>()
            .unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Syntax {
                line: 3,
                text: "px{R}".into(),
                message: "workflow name already defined",
            }
        );
    }

    #[test]
    fn workflows_without_parts() {
        let p: Puzzle = "in{x>5:A,R}".parse().unwrap();
        assert!(p.parts.is_empty());
        assert_eq!(p.accepted_rating_sum(), Ok(0));
    }
}
