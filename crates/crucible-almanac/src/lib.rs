//! Seed almanac: a pipeline of interval remappings.
//!
//! An [`Almanac`] is a list of seed numbers followed by a chain of
//! [`Stage`]s (seed-to-soil, soil-to-fertilizer, ...). Each stage is a set
//! of [`MapRule`]s that shift one source interval onto a destination; values
//! no rule covers pass through unchanged. Seeds can be pushed through the
//! pipeline one value at a time, or, read as `(start, length)` pairs, as
//! whole intervals that split at rule boundaries.

mod almanac;
mod error;
mod stage;

pub use almanac::Almanac;
pub use error::AlmanacError;
pub use stage::{MapRule, Stage};
