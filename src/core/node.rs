//! The state tree: arena-allocated nodes with a flat global name index.
//!
//! Nodes own their children. The parent link is a plain index used only for
//! upward traversal during bubbling and ancestry computation, so ownership
//! runs strictly parent to child. The tree is built once and never mutated
//! afterwards.

use std::collections::{HashMap, HashSet};

use crate::core::event::{EventSpec, ENTRY, EXIT, INIT};

/// Opaque handle to a node in a [`StateTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) usize);

/// A single named state.
pub struct StateNode {
    pub(crate) name: String,
    pub(crate) entry: Option<EventSpec>,
    pub(crate) exit: Option<EventSpec>,
    pub(crate) init: Option<EventSpec>,
    pub(crate) events: HashMap<String, EventSpec>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl StateNode {
    /// The state's globally unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this state has no substates.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The specification attached to `event` on this node, if any.
    ///
    /// The reserved names resolve to the dedicated `entry`/`exit`/`init`
    /// fields; every other name is looked up in the event map.
    pub(crate) fn spec_for(&self, event: &str) -> Option<&EventSpec> {
        match event {
            ENTRY => self.entry.as_ref(),
            EXIT => self.exit.as_ref(),
            INIT => self.init.as_ref(),
            _ => self.events.get(event),
        }
    }

    pub(crate) fn init_spec(&self) -> Option<&EventSpec> {
        self.init.as_ref()
    }
}

/// Immutable-after-build tree of states.
///
/// Names are unique across the whole tree, so every lookup is by flat
/// global name regardless of nesting depth.
pub struct StateTree {
    nodes: Vec<StateNode>,
    index: HashMap<String, NodeId>,
}

impl StateTree {
    pub(crate) fn new() -> Self {
        StateTree {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a node, linking it under its declared parent.
    ///
    /// Returns `None` when the name is already taken.
    pub(crate) fn insert(&mut self, node: StateNode) -> Option<NodeId> {
        if self.index.contains_key(&node.name) {
            return None;
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(node.name.clone(), id);
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        Some(id)
    }

    /// Borrow a node by id.
    pub(crate) fn node(&self, id: NodeId) -> &StateNode {
        &self.nodes[id.0]
    }

    /// Find a node anywhere in the tree by its global name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Iterate from `from` up through its ancestors to a root.
    pub(crate) fn chain(&self, from: NodeId) -> Chain<'_> {
        Chain {
            tree: self,
            next: Some(from),
        }
    }

    /// Deepest node that is an ancestor of (or equal to) both `a` and `b`.
    ///
    /// `None` when the two live in disjoint root subtrees.
    pub(crate) fn lca(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let ancestors: HashSet<NodeId> = self.chain(a).collect();
        self.chain(b).find(|id| ancestors.contains(id))
    }

    /// Nodes on `from`'s ancestor chain up to but excluding `stop`,
    /// deepest first. A `stop` of `None` keeps the whole chain.
    pub(crate) fn path_until(&self, from: NodeId, stop: Option<NodeId>) -> Vec<NodeId> {
        self.chain(from)
            .take_while(|id| Some(*id) != stop)
            .collect()
    }
}

pub(crate) struct Chain<'a> {
    tree: &'a StateTree,
    next: Option<NodeId>,
}

impl Iterator for Chain<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
