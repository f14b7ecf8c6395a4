//! Error type emitted by the `crucible` binary.

use crucible_almanac::AlmanacError;
use crucible_core::{GridError, InputError};
use crucible_workflows::WorkflowError;
use thiserror::Error;

/// Errors emitted by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Almanac(#[from] AlmanacError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    /// Writing results to stdout failed.
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}
