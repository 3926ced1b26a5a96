//! Declarative configuration of a single state.

use crate::core::{EventSpec, ENTRY, EXIT, INIT};

/// Configuration for one state and its substates.
///
/// # Example
///
/// ```rust
/// use statechart::{EventSpec, StateConfig};
///
/// let playing = StateConfig::new("playing")
///     .init(EventSpec::target("track"))
///     .entry(EventSpec::action(|| println!("starting playback")))
///     .on("stop", EventSpec::goto("stopped"))
///     .state(StateConfig::new("track"));
/// # let _ = playing;
/// ```
pub struct StateConfig {
    pub(crate) name: String,
    pub(crate) entry: Option<EventSpec>,
    pub(crate) exit: Option<EventSpec>,
    pub(crate) init: Option<EventSpec>,
    pub(crate) events: Vec<(String, EventSpec)>,
    pub(crate) children: Vec<StateConfig>,
}

impl StateConfig {
    /// Start configuring a state with the given globally unique name.
    pub fn new(name: impl Into<String>) -> Self {
        StateConfig {
            name: name.into(),
            entry: None,
            exit: None,
            init: None,
            events: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Behavior run when the state becomes active.
    pub fn entry(mut self, spec: EventSpec) -> Self {
        self.entry = Some(spec);
        self
    }

    /// Behavior run when the state becomes inactive.
    pub fn exit(mut self, spec: EventSpec) -> Self {
        self.exit = Some(spec);
        self
    }

    /// Default child entered when this state is activated without a deeper
    /// target. The legal shape is [`EventSpec::target`].
    pub fn init(mut self, spec: EventSpec) -> Self {
        self.init = Some(spec);
        self
    }

    /// React to `event` with `spec`.
    ///
    /// The reserved names `entry`, `exit`, and `init` route to their
    /// dedicated fields.
    pub fn on(mut self, event: impl Into<String>, spec: EventSpec) -> Self {
        let event = event.into();
        match event.as_str() {
            ENTRY => self.entry = Some(spec),
            EXIT => self.exit = Some(spec),
            INIT => self.init = Some(spec),
            _ => self.events.push((event, spec)),
        }
        self
    }

    /// Add a substate.
    pub fn state(mut self, child: StateConfig) -> Self {
        self.children.push(child);
        self
    }
}
