//! Declarative construction of charts.
//!
//! A chart is described the way the host thinks about it: a tree of named
//! [`StateConfig`]s with entry/exit behavior, default children, and event
//! reactions, plus the name of the state the chart starts in. `build()`
//! flattens the description into the engine's arena and validates it.

mod error;
mod machine;
mod state;

pub use error::BuildError;
pub use machine::StatechartBuilder;
pub use state::StateConfig;
