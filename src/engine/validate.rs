//! Legality rules for the reserved lifecycle events.
//!
//! `init`, `entry`, and `exit` accept a narrower range of specifications
//! than ordinary events. The rules are applied to the candidate selected
//! after guard evaluation and before any side effect, so a violation
//! aborts the dispatch with the chart untouched.

use crate::core::{Candidate, EventSpec, ENTRY, EXIT, INIT};
use crate::engine::error::DispatchError;

/// Apply the reserved-event rules to the candidate selected from `spec`.
///
/// - `init` must have been declared as a bare state name; any other shape
///   that produced a selected candidate is rejected.
/// - `entry` and `exit` candidates must not carry a target.
/// - Custom events have no shape restriction.
pub(crate) fn validate_candidate(
    event: &str,
    spec: &EventSpec,
    candidate: &Candidate<'_>,
) -> Result<(), DispatchError> {
    match event {
        INIT => match spec {
            EventSpec::Target(_) => Ok(()),
            other => Err(DispatchError::InvalidInitSpec { kind: other.kind() }),
        },
        ENTRY | EXIT => match candidate.target {
            Some(target) => Err(DispatchError::ReservedEventTarget {
                event: event.to_string(),
                target: target.to_string(),
            }),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}
