use thiserror::Error;

/// Errors raised while parsing or evaluating workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// A workflow or part line could not be parsed.
    #[error("line {line}: {message}: {text:?}")]
    Syntax {
        /// 1-based input line.
        line: usize,
        text: String,
        message: &'static str,
    },
    /// A rule sends parts to a workflow that does not exist.
    #[error("workflow {0:?} is referenced but never defined")]
    UnknownWorkflow(String),
    /// Following targets from `in` loops forever.
    #[error("workflow {0:?} is part of a cycle")]
    Cycle(String),
    /// There is no `in` workflow to start from.
    #[error("no `in` workflow to start sorting from")]
    MissingEntry,
    /// Two workflows share a name.
    #[error("workflow {0:?} is defined more than once")]
    Duplicate(String),
    /// The accepted combinations do not fit in a `u64`.
    #[error("accepted combinations for ratings {lo}..={hi} overflow a u64")]
    Overflow { lo: u32, hi: u32 },
}
