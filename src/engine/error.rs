//! Runtime dispatch errors.

use thiserror::Error;

/// Errors raised by [`Statechart::run`](crate::Statechart::run) and
/// [`Statechart::dispatch`](crate::Statechart::dispatch).
///
/// A failing `dispatch` fires no callbacks and does not move the current
/// state. A failing `run` stops its descent at the state it was entering
/// and leaves the chart there.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A transition target or `init` string names a state absent from the
    /// tree.
    #[error("No state named `{name}` exists in the chart")]
    NameNotFound { name: String },

    /// The dispatched event is not handled by the current state or any of
    /// its ancestors.
    #[error("Event `{event}` is not handled by `{state}` or any of its ancestors")]
    UnknownEvent { event: String, state: String },

    /// `init` was specified as something other than a bare state name.
    #[error("`init` must be the bare name of a state, not {kind}")]
    InvalidInitSpec { kind: &'static str },

    /// An `entry` or `exit` handler carried a transition target.
    #[error("`{event}` handlers cannot carry a target (found `{target}`)")]
    ReservedEventTarget { event: String, target: String },

    /// Following `init` defaults revisited a state and would never settle.
    #[error("`init` chain through `{state}` loops and never reaches a stable leaf")]
    InitCycle { state: String },

    /// `dispatch` was invoked from inside an in-flight dispatch.
    #[error("A dispatch is already in flight; re-entrant dispatch is not supported")]
    ReentrantDispatch,

    /// `run` was called on a chart that is already running.
    #[error("Chart is already running; .run() may only be called once")]
    AlreadyRunning,

    /// `dispatch` was called before `run`.
    #[error("Chart is not running. Call .run() before dispatching events")]
    NotRunning,
}
