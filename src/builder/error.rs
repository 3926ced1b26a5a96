//! Build errors for chart construction.

use thiserror::Error;

/// Errors that can occur when assembling a chart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Initial state `{name}` does not exist in the chart")]
    UnknownInitialState { name: String },

    #[error("State name `{name}` is used more than once; names are unique across the whole chart")]
    DuplicateStateName { name: String },
}
