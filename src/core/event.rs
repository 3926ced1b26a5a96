//! Event specifications and candidate resolution.
//!
//! A state reacts to an event through an *event specification*, which the
//! host may declare in one of four shapes: a bare action function, a single
//! handler, an ordered list of handlers, or a bare target-state name. The
//! resolver normalizes every shape into an ordered list of guarded
//! [`Candidate`]s and the selector picks the first whose guard passes.

use crate::core::guard::Guard;

/// Reserved event name for a composite state's default-child descent.
pub const INIT: &str = "init";
/// Reserved event name fired when a state becomes active.
pub const ENTRY: &str = "entry";
/// Reserved event name fired when a state becomes inactive.
pub const EXIT: &str = "exit";

/// Zero-argument side-effect callback supplied by the host.
pub type Action = Box<dyn Fn() + Send + Sync>;

/// A single guarded reaction to an event.
///
/// Any combination of guard, action, and target is representable; which
/// combinations are legal depends on the event the handler is attached to.
///
/// # Example
///
/// ```rust
/// use statechart::Handler;
///
/// let retry = Handler::new()
///     .when(|| true)
///     .action(|| println!("retrying"))
///     .to("connecting");
/// ```
#[derive(Default)]
pub struct Handler {
    pub(crate) guard: Option<Guard>,
    pub(crate) action: Option<Action>,
    pub(crate) target: Option<String>,
}

impl Handler {
    /// Create an empty handler: no guard, no action, no target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state this handler transitions to.
    pub fn to(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add a pre-built guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Set the action run when this handler fires.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }
}

/// The raw shape of an event reaction, as the host declared it.
///
/// # Example
///
/// ```rust
/// use statechart::{EventSpec, Handler};
///
/// // a plain targeted transition
/// let open = EventSpec::goto("opened");
///
/// // an ordered list; the first candidate whose guard passes wins
/// let next = EventSpec::handlers(vec![
///     Handler::new().when(|| false).to("locked"),
///     Handler::new().to("opened"),
/// ]);
/// # let _ = (open, next);
/// ```
pub enum EventSpec {
    /// A bare function: one unconditional, targetless candidate.
    Action(Action),
    /// A single handler.
    Handler(Handler),
    /// An ordered list of handlers.
    Handlers(Vec<Handler>),
    /// A bare target-state name.
    ///
    /// Only `init` gives this shape meaning; attached to any other event it
    /// yields no candidates at all. The asymmetry is inherited behavior and
    /// intentional: a stray string elsewhere is a silent no-op, not an
    /// error.
    Target(String),
}

impl EventSpec {
    /// Bare action shorthand.
    pub fn action<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        EventSpec::Action(Box::new(action))
    }

    /// Bare target-name shorthand, the legal form of `init`.
    pub fn target(name: impl Into<String>) -> Self {
        EventSpec::Target(name.into())
    }

    /// Single-handler shorthand for the common unguarded targeted reaction.
    pub fn goto(target: impl Into<String>) -> Self {
        EventSpec::Handler(Handler::new().to(target))
    }

    /// Single handler.
    pub fn handler(handler: Handler) -> Self {
        EventSpec::Handler(handler)
    }

    /// Ordered handler list.
    pub fn handlers(handlers: Vec<Handler>) -> Self {
        EventSpec::Handlers(handlers)
    }

    /// Human-readable shape name, used in error messages.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            EventSpec::Action(_) => "a bare action function",
            EventSpec::Handler(_) => "a handler object",
            EventSpec::Handlers(_) => "a handler array",
            EventSpec::Target(_) => "a target-state name",
        }
    }
}

/// A normalized candidate borrowed from an [`EventSpec`].
///
/// A missing guard counts as passing.
pub struct Candidate<'a> {
    pub(crate) guard: Option<&'a Guard>,
    pub(crate) action: Option<&'a Action>,
    pub(crate) target: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    fn from_handler(handler: &'a Handler) -> Self {
        Candidate {
            guard: handler.guard.as_ref(),
            action: handler.action.as_ref(),
            target: handler.target.as_deref(),
        }
    }

    /// Evaluate this candidate's guard.
    pub fn passes(&self) -> bool {
        self.guard.is_none_or(Guard::check)
    }
}

/// Normalize a specification into its ordered candidate list for `event`.
///
/// The bare-string shape resolves to a single targeted candidate for
/// `init` and to nothing for every other event name.
pub fn resolve<'a>(spec: &'a EventSpec, event: &str) -> Vec<Candidate<'a>> {
    match spec {
        EventSpec::Action(action) => vec![Candidate {
            guard: None,
            action: Some(action),
            target: None,
        }],
        EventSpec::Handler(handler) => vec![Candidate::from_handler(handler)],
        EventSpec::Handlers(handlers) => handlers.iter().map(Candidate::from_handler).collect(),
        EventSpec::Target(name) if event == INIT => vec![Candidate {
            guard: None,
            action: None,
            target: Some(name),
        }],
        EventSpec::Target(_) => Vec::new(),
    }
}

/// Pick the first candidate whose guard passes.
///
/// An empty or all-failing list yields `None`, which dispatch treats as a
/// legal no-op rather than an error.
pub fn select(candidates: Vec<Candidate<'_>>) -> Option<Candidate<'_>> {
    candidates.into_iter().find(Candidate::passes)
}
