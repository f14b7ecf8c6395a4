//! Rule-based part sorting.
//!
//! A [`System`] is a set of named [`Workflow`]s. Each workflow checks a
//! [`Part`]'s ratings against its [`Rule`]s in order and sends the part to
//! the first matching rule's [`Target`], or to its fallback. Sorting starts
//! at the `in` workflow and ends when a part is accepted or rejected.
//!
//! Besides sorting concrete parts, [`System::accepted_combinations`] counts
//! every rating combination the system would accept by pushing a 4-D box
//! of ratings through the rules and splitting it at each threshold.

mod error;
mod part;
mod puzzle;
mod rule;
mod system;

pub use error::WorkflowError;
pub use part::{Category, Part};
pub use puzzle::Puzzle;
pub use rule::{Comparison, Rule, Target, Workflow};
pub use system::{ENTRY, RatingBox, System};
