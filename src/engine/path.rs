//! Exit/entry path computation between arbitrary nodes.

use std::collections::HashSet;

use crate::core::{resolve, select, EventSpec, NodeId, StateTree, INIT};
use crate::engine::error::DispatchError;

/// The firing order for one transition: states to exit (deepest first),
/// states to enter (shallowest first), and the leaf the chart lands on
/// after following `init` defaults at the destination.
pub(crate) struct TransitionPlan {
    pub(crate) exits: Vec<NodeId>,
    pub(crate) entries: Vec<NodeId>,
    pub(crate) landing: NodeId,
}

impl TransitionPlan {
    /// Compute the plan for moving from `source` to the state named
    /// `target_name`.
    ///
    /// States at or above the common ancestor appear in neither path, so a
    /// move between siblings never touches their shared parent.
    pub(crate) fn compute(
        tree: &StateTree,
        source: NodeId,
        target_name: &str,
    ) -> Result<Self, DispatchError> {
        let target = tree.find(target_name).ok_or_else(|| DispatchError::NameNotFound {
            name: target_name.to_string(),
        })?;

        let lca = tree.lca(source, target);
        let exits = tree.path_until(source, lca);
        let mut entries = tree.path_until(target, lca);
        entries.reverse();

        // Follow default-child descents at the destination.
        let mut landing = target;
        let mut visited = HashSet::from([target]);
        while let Some(next_name) = init_target(tree, landing)? {
            let next = tree.find(next_name).ok_or_else(|| DispatchError::NameNotFound {
                name: next_name.to_string(),
            })?;
            if !visited.insert(next) {
                return Err(DispatchError::InitCycle {
                    state: next_name.to_string(),
                });
            }
            let hop_lca = tree.lca(landing, next);
            let mut hop = tree.path_until(next, hop_lca);
            hop.reverse();
            entries.extend(hop);
            landing = next;
        }

        Ok(TransitionPlan {
            exits,
            entries,
            landing,
        })
    }
}

/// Resolve a node's `init` spec to the name of its default child.
///
/// Returns `Ok(None)` when the node has no `init`, or when no candidate
/// passes its guard. Any shape other than a bare state name is rejected
/// once a candidate is selected from it.
pub(crate) fn init_target(
    tree: &StateTree,
    node: NodeId,
) -> Result<Option<&str>, DispatchError> {
    let Some(spec) = tree.node(node).init_spec() else {
        return Ok(None);
    };
    match spec {
        EventSpec::Target(name) => Ok(Some(name)),
        other => match select(resolve(other, INIT)) {
            Some(_) => Err(DispatchError::InvalidInitSpec { kind: other.kind() }),
            None => Ok(None),
        },
    }
}
