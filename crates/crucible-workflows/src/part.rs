use std::fmt;
use std::str::FromStr;

/// One of the four rating categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    X,
    M,
    A,
    S,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::X, Category::M, Category::A, Category::S];

    /// Position of this category in a ratings array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Category::X => 0,
            Category::M => 1,
            Category::A => 2,
            Category::S => 3,
        }
    }

    pub const fn from_char(c: char) -> Option<Category> {
        match c {
            'x' => Some(Category::X),
            'm' => Some(Category::M),
            'a' => Some(Category::A),
            's' => Some(Category::S),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Category::X => 'x',
            Category::M => 'm',
            Category::A => 'a',
            Category::S => 's',
        }
    }
}

/// A part with one rating per category.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Part {
    ratings: [u32; 4],
}

impl Part {
    pub const fn new(x: u32, m: u32, a: u32, s: u32) -> Self {
        Self {
            ratings: [x, m, a, s],
        }
    }

    #[inline]
    pub fn rating(&self, c: Category) -> u32 {
        self.ratings[c.index()]
    }

    /// Sum of all four ratings.
    pub fn total(&self) -> u64 {
        self.ratings.iter().map(|&r| u64::from(r)).sum()
    }
}

impl FromStr for Part {
    type Err = &'static str;

    /// Parse `{x=787,m=2655,a=1222,s=2876}`. Categories may come in any
    /// order but each must appear exactly once.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_prefix('{')
            .and_then(|b| b.strip_suffix('}'))
            .ok_or("part must be wrapped in braces")?;
        let mut ratings: [Option<u32>; 4] = [None; 4];
        for field in body.split(',') {
            let (key, value) = field.split_once('=').ok_or("rating without `=`")?;
            let mut chars = key.trim().chars();
            let category = match (chars.next(), chars.next()) {
                (Some(c), None) => Category::from_char(c).ok_or("unknown rating category")?,
                _ => return Err("unknown rating category"),
            };
            let value = value.trim().parse().map_err(|_| "rating is not a number")?;
            let slot = &mut ratings[category.index()];
            if slot.replace(value).is_some() {
                return Err("rating category repeated");
            }
        }
        let [Some(x), Some(m), Some(a), Some(s)] = ratings else {
            return Err("part is missing a rating category");
        };
        Ok(Part::new(x, m, a, s))
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, c) in Category::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", c.as_char(), self.rating(*c))?;
        }
        f.write_str("}")
    }
}
