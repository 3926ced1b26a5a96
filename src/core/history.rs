//! Transition history tracking.
//!
//! Provides immutable tracking of the transitions a chart has performed
//! over time. The chart records one entry per successful targeted
//! transition; the history never includes failed dispatches or targetless
//! action firings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use statechart::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     event: "open".to_string(),
///     from: "closed".to_string(),
///     to: "opened".to_string(),
///     timestamp: Utc::now(),
/// };
/// # let _ = record;
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The event that triggered the transition
    pub event: String,
    /// The leaf state the chart left
    pub from: String,
    /// The leaf state the chart landed on
    pub to: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of completed transitions.
///
/// History is immutable: `record` returns a new history with the
/// transition added rather than mutating the receiver.
///
/// # Example
///
/// ```rust
/// use statechart::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = TransitionHistory::new();
/// let history = history.record(TransitionRecord {
///     event: "open".to_string(),
///     from: "closed".to_string(),
///     to: "opened".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["closed", "opened"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionHistory {
    transitions: Vec<TransitionRecord>,
}

impl TransitionHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of leaf states traversed.
    ///
    /// Returns the starting leaf followed by the `to` state of each
    /// transition, in order.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Total duration from the first to the last transition.
    ///
    /// `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All recorded transitions, in order.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }
}
