use std::fmt;

use crate::part::{Category, Part};

/// How a rule compares a rating with its threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    Greater,
}

/// Where a rule or workflow sends a part.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Accept,
    Reject,
    Workflow(String),
}

impl Target {
    fn parse(s: &str) -> Target {
        match s {
            "A" => Target::Accept,
            "R" => Target::Reject,
            name => Target::Workflow(name.to_owned()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Accept => f.write_str("A"),
            Target::Reject => f.write_str("R"),
            Target::Workflow(name) => f.write_str(name),
        }
    }
}

/// `category cmp threshold : target`, e.g. `a<2006:qkq`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub category: Category,
    pub cmp: Comparison,
    pub threshold: u32,
    pub target: Target,
}

impl Rule {
    /// Whether `part` satisfies this rule.
    pub fn matches(&self, part: &Part) -> bool {
        let rating = part.rating(self.category);
        match self.cmp {
            Comparison::Less => rating < self.threshold,
            Comparison::Greater => rating > self.threshold,
        }
    }

    fn parse(s: &str) -> Result<Rule, &'static str> {
        let (condition, target) = s.split_once(':').ok_or("rule without `:`")?;
        let mut chars = condition.chars();
        let category = chars
            .next()
            .and_then(Category::from_char)
            .ok_or("unknown rating category")?;
        let cmp = match chars.next() {
            Some('<') => Comparison::Less,
            Some('>') => Comparison::Greater,
            _ => return Err("expected `<` or `>`"),
        };
        let threshold = chars
            .as_str()
            .parse()
            .map_err(|_| "threshold is not a number")?;
        if target.is_empty() {
            return Err("rule without a target");
        }
        Ok(Rule {
            category,
            cmp,
            threshold,
            target: Target::parse(target),
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.cmp {
            Comparison::Less => '<',
            Comparison::Greater => '>',
        };
        write!(
            f,
            "{}{}{}:{}",
            self.category.as_char(),
            op,
            self.threshold,
            self.target
        )
    }
}

/// A named list of rules plus a fallback target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workflow {
    pub name: String,
    pub rules: Vec<Rule>,
    pub fallback: Target,
}

impl Workflow {
    /// Where this workflow sends `part`.
    pub fn route(&self, part: &Part) -> &Target {
        self.rules
            .iter()
            .find(|r| r.matches(part))
            .map_or(&self.fallback, |r| &r.target)
    }

    /// Every target this workflow can send parts to.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.rules
            .iter()
            .map(|r| &r.target)
            .chain(std::iter::once(&self.fallback))
    }

    /// Parse `px{a<2006:qkq,m>2090:A,rfg}`.
    pub fn parse(s: &str) -> Result<Workflow, &'static str> {
        let s = s.trim();
        let (name, rest) = s.split_once('{').ok_or("workflow without `{`")?;
        let body = rest.strip_suffix('}').ok_or("workflow without closing `}`")?;
        if name.is_empty() {
            return Err("workflow without a name");
        }
        let mut parts: Vec<&str> = body.split(',').collect();
        let fallback = match parts.pop() {
            Some(f) if !f.is_empty() && !f.contains(':') => Target::parse(f),
            _ => return Err("workflow must end with a fallback target"),
        };
        let rules = parts
            .into_iter()
            .map(Rule::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Workflow {
            name: name.to_owned(),
            rules,
            fallback,
        })
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for rule in &self.rules {
            write!(f, "{rule},")?;
        }
        write!(f, "{}}}", self.fallback)
    }
}
