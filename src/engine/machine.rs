//! The running chart: event dispatch and lifecycle execution.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, trace};

use crate::core::{
    resolve, select, Action, EventSpec, NodeId, StateNode, StateTree, TransitionHistory,
    TransitionRecord, ENTRY, EXIT, INIT,
};
use crate::engine::error::DispatchError;
use crate::engine::path::{init_target, TransitionPlan};
use crate::engine::validate::validate_candidate;

/// A hierarchical state machine.
///
/// Built by [`StatechartBuilder`](crate::StatechartBuilder). The chart
/// owns exactly one piece of mutable state, the currently active leaf;
/// the state tree itself is immutable once built. Dispatch runs to
/// completion synchronously, including every exit, entry, and action
/// callback it triggers.
///
/// # Example
///
/// ```rust
/// use statechart::{EventSpec, StateConfig, StatechartBuilder};
///
/// let mut chart = StatechartBuilder::new()
///     .initial("closed")
///     .state(StateConfig::new("closed").on("open", EventSpec::goto("opened")))
///     .state(StateConfig::new("opened").on("close", EventSpec::goto("closed")))
///     .build()
///     .unwrap();
///
/// chart.run().unwrap();
/// chart.dispatch("open").unwrap();
///
/// assert_eq!(chart.current_state().map(|s| s.name()), Some("opened"));
/// ```
pub struct Statechart {
    tree: StateTree,
    initial: NodeId,
    current: Option<NodeId>,
    in_dispatch: bool,
    history: TransitionHistory,
}

impl Statechart {
    pub(crate) fn new(tree: StateTree, initial: NodeId) -> Self {
        Statechart {
            tree,
            initial,
            current: None,
            in_dispatch: false,
            history: TransitionHistory::new(),
        }
    }

    /// Enter the initial state and follow its `init` defaults down to a
    /// stable leaf, firing `entry` along the descent.
    ///
    /// Fails with [`DispatchError::AlreadyRunning`] on a second call. When
    /// a malformed `init` or `entry` is hit mid-descent the error
    /// propagates and the chart stays at the state it was entering.
    pub fn run(&mut self) -> Result<(), DispatchError> {
        if self.in_dispatch {
            return Err(DispatchError::ReentrantDispatch);
        }
        if self.current.is_some() {
            return Err(DispatchError::AlreadyRunning);
        }
        self.in_dispatch = true;
        let result = self.enter_initial();
        self.in_dispatch = false;
        result
    }

    /// Dispatch an event to the chart.
    ///
    /// The event name is looked up starting at the current leaf and
    /// bubbling up through its ancestors. An event nobody handles is an
    /// error, except `init`, which tolerates absence as a no-op. A handled
    /// event whose candidates all fail their guards is a silent no-op.
    ///
    /// Validation of the selected candidate, and of every `exit`/`entry`
    /// firing on the computed paths, happens before the first callback
    /// runs: a failing dispatch has no side effects at all.
    pub fn dispatch(&mut self, event: &str) -> Result<(), DispatchError> {
        if self.in_dispatch {
            return Err(DispatchError::ReentrantDispatch);
        }
        let Some(current) = self.current else {
            return Err(DispatchError::NotRunning);
        };
        self.in_dispatch = true;
        let result = self.dispatch_from(current, event);
        self.in_dispatch = false;
        result
    }

    /// The currently active leaf state, or `None` before `run()`.
    pub fn current_state(&self) -> Option<&StateNode> {
        self.current.map(|id| self.tree.node(id))
    }

    /// Whether `run()` has been called.
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// History of completed transitions.
    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    fn enter_initial(&mut self) -> Result<(), DispatchError> {
        debug!(
            initial = self.tree.node(self.initial).name(),
            "starting chart"
        );
        self.current = Some(self.initial);
        self.fire_lifecycle(self.initial, ENTRY)?;
        self.descend(self.initial)
    }

    /// Follow `init` defaults from `from`, entering one state at a time
    /// and advancing the current leaf as each state is entered.
    fn descend(&mut self, from: NodeId) -> Result<(), DispatchError> {
        let mut landing = from;
        let mut visited = HashSet::from([from]);
        loop {
            let Some(name) = init_target(&self.tree, landing)? else {
                return Ok(());
            };
            let next = self.tree.find(name).ok_or_else(|| DispatchError::NameNotFound {
                name: name.to_string(),
            })?;
            if !visited.insert(next) {
                return Err(DispatchError::InitCycle {
                    state: name.to_string(),
                });
            }
            let hop_lca = self.tree.lca(landing, next);
            let mut hop = self.tree.path_until(next, hop_lca);
            hop.reverse();
            for id in hop {
                self.current = Some(id);
                self.fire_lifecycle(id, ENTRY)?;
            }
            landing = next;
        }
    }

    /// Fire a node's own `entry`/`exit` behavior. The lookup is restricted
    /// to the node itself; lifecycle firing does not bubble.
    fn fire_lifecycle(&self, node: NodeId, event: &str) -> Result<(), DispatchError> {
        if let Some(action) = prepare_lifecycle(&self.tree, node, event)? {
            trace!(state = self.tree.node(node).name(), event, "firing");
            action();
        }
        Ok(())
    }

    fn dispatch_from(&mut self, current: NodeId, event: &str) -> Result<(), DispatchError> {
        let tree = &self.tree;

        let Some((owner, spec)) = bubble_lookup(tree, current, event) else {
            if event == INIT {
                debug!(event, "unhandled `init` dispatch is a no-op");
                return Ok(());
            }
            return Err(DispatchError::UnknownEvent {
                event: event.to_string(),
                state: tree.node(current).name().to_string(),
            });
        };
        debug!(event, handler = tree.node(owner).name(), "dispatching");

        let Some(candidate) = select(resolve(spec, event)) else {
            debug!(event, "no candidate passed its guard");
            return Ok(());
        };
        validate_candidate(event, spec, &candidate)?;

        let Some(target_name) = candidate.target else {
            if let Some(action) = candidate.action {
                action();
            }
            return Ok(());
        };

        let plan = TransitionPlan::compute(tree, current, target_name)?;

        // Resolve and validate every lifecycle firing before running any
        // callback, so a malformed handler aborts with nothing fired.
        let mut exit_actions = Vec::with_capacity(plan.exits.len());
        for &id in &plan.exits {
            exit_actions.push(prepare_lifecycle(tree, id, EXIT)?);
        }
        let mut entry_actions = Vec::with_capacity(plan.entries.len());
        for &id in &plan.entries {
            entry_actions.push(prepare_lifecycle(tree, id, ENTRY)?);
        }

        for (&id, action) in plan.exits.iter().zip(&exit_actions) {
            trace!(state = tree.node(id).name(), "exit");
            if let Some(action) = action {
                action();
            }
        }
        for (&id, action) in plan.entries.iter().zip(&entry_actions) {
            trace!(state = tree.node(id).name(), "entry");
            if let Some(action) = action {
                action();
            }
        }
        if let Some(action) = candidate.action {
            action();
        }

        let record = TransitionRecord {
            event: event.to_string(),
            from: tree.node(current).name().to_string(),
            to: tree.node(plan.landing).name().to_string(),
            timestamp: Utc::now(),
        };
        debug!(from = %record.from, to = %record.to, event, "transition complete");
        self.current = Some(plan.landing);
        self.history = self.history.record(record);
        Ok(())
    }
}

/// Search for `event` starting at `from` and walking up the ancestor
/// chain. Reserved names consult each node's dedicated lifecycle fields.
fn bubble_lookup<'t>(
    tree: &'t StateTree,
    from: NodeId,
    event: &str,
) -> Option<(NodeId, &'t EventSpec)> {
    tree.chain(from)
        .find_map(|id| tree.node(id).spec_for(event).map(|spec| (id, spec)))
}

/// Resolve, select, and validate a node's own `entry`/`exit` firing
/// without running it.
fn prepare_lifecycle<'t>(
    tree: &'t StateTree,
    node: NodeId,
    event: &str,
) -> Result<Option<&'t Action>, DispatchError> {
    let Some(spec) = tree.node(node).spec_for(event) else {
        return Ok(None);
    };
    let Some(candidate) = select(resolve(spec, event)) else {
        return Ok(None);
    };
    validate_candidate(event, spec, &candidate)?;
    Ok(candidate.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateConfig, StatechartBuilder};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let calls = Arc::new(AtomicUsize::new(0));
        let shared = calls.clone();
        (calls, move || {
            shared.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn two_state_chart() -> Statechart {
        StatechartBuilder::new()
            .initial("A")
            .state(StateConfig::new("A").on("go", EventSpec::goto("B")))
            .state(StateConfig::new("B").on("back", EventSpec::goto("A")))
            .build()
            .unwrap()
    }

    #[test]
    fn run_enters_the_initial_state() {
        let mut chart = two_state_chart();

        assert!(chart.current_state().is_none());
        chart.run().unwrap();

        assert!(chart.is_running());
        assert_eq!(chart.current_state().map(|s| s.name()), Some("A"));
    }

    #[test]
    fn run_twice_is_rejected() {
        let mut chart = two_state_chart();
        chart.run().unwrap();

        assert_eq!(chart.run(), Err(DispatchError::AlreadyRunning));
        assert_eq!(chart.current_state().map(|s| s.name()), Some("A"));
    }

    #[test]
    fn dispatch_before_run_is_rejected() {
        let mut chart = two_state_chart();

        assert_eq!(chart.dispatch("go"), Err(DispatchError::NotRunning));
    }

    #[test]
    fn dispatch_moves_between_states() {
        let mut chart = two_state_chart();
        chart.run().unwrap();

        chart.dispatch("go").unwrap();
        assert_eq!(chart.current_state().map(|s| s.name()), Some("B"));

        chart.dispatch("back").unwrap();
        assert_eq!(chart.current_state().map(|s| s.name()), Some("A"));
    }

    #[test]
    fn self_transition_does_not_refire_lifecycle() {
        let (entries, entry_action) = counter();
        let (exits, exit_action) = counter();

        let mut chart = StatechartBuilder::new()
            .initial("A")
            .state(
                StateConfig::new("A")
                    .entry(EventSpec::action(entry_action))
                    .exit(EventSpec::action(exit_action))
                    .on("again", EventSpec::goto("A")),
            )
            .build()
            .unwrap();
        chart.run().unwrap();
        chart.dispatch("again").unwrap();

        assert_eq!(entries.load(Ordering::SeqCst), 1);
        assert_eq!(exits.load(Ordering::SeqCst), 0);
        assert_eq!(chart.current_state().map(|s| s.name()), Some("A"));
    }

    #[test]
    fn targetless_candidate_runs_only_its_action() {
        let (calls, action) = counter();

        let mut chart = StatechartBuilder::new()
            .initial("A")
            .state(StateConfig::new("A").on("ping", EventSpec::action(action)))
            .build()
            .unwrap();
        chart.run().unwrap();
        chart.dispatch("ping").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(chart.current_state().map(|s| s.name()), Some("A"));
        assert!(chart.history().transitions().is_empty());
    }

    #[test]
    fn events_bubble_to_ancestors() {
        let mut chart = StatechartBuilder::new()
            .initial("deep")
            .state(
                StateConfig::new("top")
                    .on("escape", EventSpec::goto("other"))
                    .state(StateConfig::new("deep")),
            )
            .state(StateConfig::new("other"))
            .build()
            .unwrap();
        chart.run().unwrap();

        chart.dispatch("escape").unwrap();

        assert_eq!(chart.current_state().map(|s| s.name()), Some("other"));
    }

    #[test]
    fn transitions_are_recorded_in_history() {
        let mut chart = two_state_chart();
        chart.run().unwrap();

        chart.dispatch("go").unwrap();
        chart.dispatch("back").unwrap();

        let history = chart.history();
        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.get_path(), vec!["A", "B", "A"]);
        assert_eq!(history.transitions()[0].event, "go");
    }

    #[test]
    fn failed_dispatch_is_not_recorded() {
        let mut chart = two_state_chart();
        chart.run().unwrap();

        assert!(chart.dispatch("bogus").is_err());

        assert!(chart.history().transitions().is_empty());
    }
}
