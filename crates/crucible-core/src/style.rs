//! Console formatting helpers: ANSI colours and horizontal rules.
//!
//! Everything here is cosmetic. Functions are pure and only decorate the
//! strings they are given.

use std::fmt;

/// An ANSI foreground colour or attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Header,
    Blue,
    Cyan,
    Green,
    Warning,
    Fail,
    Bold,
    Underline,
}

/// Escape sequence that resets all attributes.
pub const RESET: &str = "\x1b[0m";

impl Color {
    /// The escape sequence that switches this colour on.
    pub const fn code(self) -> &'static str {
        match self {
            Color::Header => "\x1b[95m",
            Color::Blue => "\x1b[94m",
            Color::Cyan => "\x1b[96m",
            Color::Green => "\x1b[92m",
            Color::Warning => "\x1b[93m",
            Color::Fail => "\x1b[91m",
            Color::Bold => "\x1b[1m",
            Color::Underline => "\x1b[4m",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Wrap `text` in `color`, resetting afterwards.
pub fn paint(text: &str, color: Color) -> String {
    format!("{color}{text}{RESET}")
}

/// Shorthand for `paint(text, Color::Blue)`.
pub fn blue(text: &str) -> String {
    paint(text, Color::Blue)
}

/// A rule made of `len` copies of `ch`.
pub fn horizontal_rule(ch: char, len: usize) -> String {
    std::iter::repeat_n(ch, len).collect()
}

/// `text` between two 50-character dashed rules.
pub fn pad_with_rules(text: &str) -> String {
    let rule = horizontal_rule('-', 50);
    format!("{rule}\n{text}\n{rule}")
}
