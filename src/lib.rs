//! A hierarchical state machine (statechart) engine.
//!
//! A chart is a tree of named states. Each state may declare `entry`/`exit`
//! behavior, a default child to enter (`init`), nested substates, and
//! guarded reactions to named events. The engine tracks a single active
//! leaf state; dispatching an event looks the name up from the leaf upward
//! through its ancestors, picks the first candidate whose guard passes,
//! and fires exit and entry callbacks along the paths between the old and
//! new state, never touching states above their common ancestor.
//!
//! # Core Concepts
//!
//! - **States**: declared with [`StateConfig`], nested to any depth, named
//!   uniquely across the whole chart
//! - **Events**: heterogeneous specifications via [`EventSpec`], normalized
//!   into ordered guarded candidates
//! - **Guards**: pure predicates controlling which candidate fires
//! - **Reserved events**: `init`, `entry`, and `exit` carry stricter rules
//!   than ordinary events
//!
//! # Example
//!
//! ```rust
//! use statechart::{EventSpec, StateConfig, StatechartBuilder};
//!
//! let mut chart = StatechartBuilder::new()
//!     .initial("idle")
//!     .state(StateConfig::new("idle").on("play", EventSpec::goto("playing")))
//!     .state(
//!         StateConfig::new("playing")
//!             .init(EventSpec::target("intro"))
//!             .on("stop", EventSpec::goto("idle"))
//!             .state(StateConfig::new("intro").on("next", EventSpec::goto("verse")))
//!             .state(StateConfig::new("verse")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! chart.run().unwrap();
//! chart.dispatch("play").unwrap();
//!
//! // entering "playing" descends through its `init` default
//! assert_eq!(chart.current_state().map(|s| s.name()), Some("intro"));
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, StateConfig, StatechartBuilder};
pub use core::{
    Action, Candidate, EventSpec, Guard, Handler, StateNode, TransitionHistory, TransitionRecord,
};
pub use engine::{DispatchError, Statechart};
