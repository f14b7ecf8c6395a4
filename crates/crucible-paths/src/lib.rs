//! Minimal heat-loss routing over digit cost grids.
//!
//! The search moves a crucible from the top-left cell of a grid to the
//! bottom-right one. Entering a cell costs its digit, the crucible may
//! never reverse, and it may not travel more than
//! [`SearchOptions::max_straight`] cells in a straight line. A search node
//! is therefore a cell *plus* the direction it was entered from and the
//! length of the current straight run.
//!
//! - [`HeatLossSearch`] runs best-first expansion and owns its scratch
//!   buffers, so repeated queries reuse their allocations.
//! - [`Outcome`] reports the result: a [`Route`], exhaustion, or
//!   cancellation through [`SearchOptions::expansion_budget`].
//! - [`HeatMap`] is the seam between the search and the grid;
//!   [`CostGrid`](crucible_core::CostGrid) implements it.

mod neighbors;
mod route;
mod search;
mod state;
mod traits;

pub use neighbors::Neighbors;
pub use route::Route;
pub use search::{HeatLossSearch, Outcome, SearchOptions, SettlePolicy, minimal_heat_loss};
pub use state::State;
pub use traits::HeatMap;
