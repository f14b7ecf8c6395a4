use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while parsing or evaluating an [`Almanac`](crate::Almanac).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlmanacError {
    /// The first line is not a `seeds:` list.
    #[error("input does not start with a `seeds:` line")]
    MissingSeeds,
    /// A token that should be a number is not one.
    #[error("line {line}: {token:?} is not a number")]
    BadNumber {
        /// 1-based input line.
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },
    /// A rule line outside a map block, without exactly three numbers, or
    /// whose intervals run past `u64::MAX`.
    #[error("line {line}: bad `destination source length` rule {text:?}")]
    BadRule { line: usize, text: String },
    /// Seed ranges were requested but the seeds do not pair up.
    #[error("seed ranges need an even number of values, found {0}")]
    OddSeedCount(usize),
}
