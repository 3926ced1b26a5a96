//! Guard predicates for controlling candidate selection.
//!
//! Guards are pure boolean functions evaluated while picking which
//! candidate of an event specification fires. They encapsulate transition
//! pre-conditions without side effects.

/// Pure predicate that determines whether a candidate may fire.
///
/// When an event resolves to several candidates, the first one whose guard
/// passes wins. A candidate without a guard always passes.
///
/// # Example
///
/// ```rust
/// use statechart::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let armed = Arc::new(AtomicBool::new(false));
///
/// let when_armed = {
///     let armed = armed.clone();
///     Guard::new(move || armed.load(Ordering::SeqCst))
/// };
///
/// assert!(!when_armed.check());
/// armed.store(true, Ordering::SeqCst);
/// assert!(when_armed.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must answer synchronously and be thread-safe
    /// (Send + Sync). It may be evaluated at any point between the dispatch
    /// of an event and the first side effect of that dispatch.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}
