//! Builder for assembling charts.

use crate::builder::error::BuildError;
use crate::builder::state::StateConfig;
use crate::core::{NodeId, StateNode, StateTree};
use crate::engine::Statechart;

/// Builder for constructing a [`Statechart`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use statechart::{EventSpec, StateConfig, StatechartBuilder};
///
/// let chart = StatechartBuilder::new()
///     .initial("closed")
///     .state(StateConfig::new("closed").on("open", EventSpec::goto("opened")))
///     .state(StateConfig::new("opened").on("close", EventSpec::goto("closed")))
///     .build();
///
/// assert!(chart.is_ok());
/// ```
pub struct StatechartBuilder {
    initial: Option<String>,
    states: Vec<StateConfig>,
}

impl StatechartBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        StatechartBuilder {
            initial: None,
            states: Vec::new(),
        }
    }

    /// Name of the state the chart starts in (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Add a top-level state.
    pub fn state(mut self, state: StateConfig) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple top-level states at once.
    pub fn states(mut self, states: Vec<StateConfig>) -> Self {
        self.states.extend(states);
        self
    }

    /// Assemble the chart.
    ///
    /// Checks that an initial state was named, that it exists, and that no
    /// state name is used twice anywhere in the tree.
    pub fn build(self) -> Result<Statechart, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut tree = StateTree::new();
        for config in self.states {
            insert_config(&mut tree, config, None)?;
        }

        let initial_id = tree
            .find(&initial)
            .ok_or(BuildError::UnknownInitialState { name: initial })?;

        Ok(Statechart::new(tree, initial_id))
    }
}

impl Default for StatechartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_config(
    tree: &mut StateTree,
    config: StateConfig,
    parent: Option<NodeId>,
) -> Result<(), BuildError> {
    let StateConfig {
        name,
        entry,
        exit,
        init,
        events,
        children,
    } = config;

    let node = StateNode {
        name: name.clone(),
        entry,
        exit,
        init,
        events: events.into_iter().collect(),
        parent,
        children: Vec::new(),
    };

    let id = tree
        .insert(node)
        .ok_or(BuildError::DuplicateStateName { name })?;

    for child in children {
        insert_config(tree, child, Some(id))?;
    }
    Ok(())
}
