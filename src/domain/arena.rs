//! Arena-backed rooted tree of labelled nodes.
//!
//! Nodes live in a generational arena owned by [`Tree`]. Parent and child links are
//! arena indices, so a node never owns its parent and removed nodes leave no dangling
//! references behind.

use std::fmt;

use generational_arena::{Arena, Index};
use rand::Rng;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Stable handle of a node inside its [`Tree`].
pub type NodeId = Index;

/// Label of the root node of every generated tree.
pub const ROOT_NODE_NAME: &str = "ROOT";

/// One tree vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    level: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance from the root, 0 for the root itself.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Index of parent node in the arena, None for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Rooted, ordered n-ary tree.
///
/// A tree always has a root. Every other query is derived from the root by walking
/// the child links, so no counters are cached.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(ROOT_NODE_NAME)
    }
}

impl Tree {
    /// Creates a tree holding a single root node at level 0.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node {
            name: root_name.into(),
            level: 0,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, idx: NodeId) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn contains(&self, idx: NodeId) -> bool {
        self.arena.contains(idx)
    }

    /// Allocates a node that is not yet attached to any child list.
    ///
    /// Attach it with [`Tree::add_child`]. Keeping `parent` and `level` consistent with
    /// the node it ends up under is the caller's job.
    #[instrument(level = "trace", skip(self, name))]
    pub fn create_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        level: usize,
    ) -> NodeId {
        self.arena.insert(Node {
            name: name.into(),
            level,
            parent,
            children: Vec::new(),
        })
    }

    /// Appends `child` to the child list of `parent`.
    ///
    /// Does not check that `child` points back at `parent`. Returns false if `parent`
    /// is not in the tree.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.arena.get_mut(parent) {
            Some(node) => {
                node.children.push(child);
                true
            }
            None => false,
        }
    }

    /// Creates a child of `parent` following the naming rule
    /// `<parent name>-<sibling number>` and attaches it.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: NodeId) -> DomainResult<NodeId> {
        let node = self
            .arena
            .get(parent)
            .ok_or(DomainError::NodeNotFound(parent))?;
        let name = format!("{}-{}", node.name, node.children.len() + 1);
        let level = node.level + 1;

        let child = self.create_node(name, Some(parent), level);
        self.add_child(parent, child);
        Ok(child)
    }

    /// Number of direct children, 0 for leaves and unknown nodes.
    pub fn children_count(&self, idx: NodeId) -> usize {
        self.arena.get(idx).map_or(0, |node| node.children.len())
    }

    /// Read-only view of the children of `idx`.
    pub fn children(&self, idx: NodeId) -> &[NodeId] {
        self.arena
            .get(idx)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    /// Detaches `child` from the child list of `parent`. The node itself stays allocated.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.arena.get_mut(parent) else {
            return false;
        };
        match node.children.iter().position(|&c| c == child) {
            Some(pos) => {
                node.children.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes a leaf from the tree.
    ///
    /// Nodes with children are left alone and false is returned. The root is never
    /// removed.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, idx: NodeId) -> bool {
        let Some(node) = self.arena.get(idx) else {
            return false;
        };
        if !node.is_leaf() {
            return false;
        }
        let Some(parent) = node.parent else {
            return false;
        };

        self.remove_child(parent, idx);
        self.arena.remove(idx);
        true
    }

    pub fn set_name(&mut self, idx: NodeId, name: impl Into<String>) -> bool {
        match self.arena.get_mut(idx) {
            Some(node) => {
                node.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_level(&mut self, idx: NodeId, level: usize) -> bool {
        match self.arena.get_mut(idx) {
            Some(node) => {
                node.level = level;
                true
            }
            None => false,
        }
    }

    /// Overwrites the parent link only. Child lists are not touched, pair this with
    /// [`Tree::remove_child`] and [`Tree::add_child`] to move a node.
    pub fn set_parent(&mut self, idx: NodeId, parent: Option<NodeId>) -> bool {
        match self.arena.get_mut(idx) {
            Some(node) => {
                node.parent = parent;
                true
            }
            None => false,
        }
    }

    /// Pre-order iterator starting at the root.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, self.root)
    }

    /// Pre-order iterator starting at `start`.
    pub fn iter_from(&self, start: NodeId) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, start)
    }

    /// All nodes in pre-order, root first.
    #[instrument(level = "trace", skip(self))]
    pub fn to_list(&self) -> Vec<NodeId> {
        self.to_list_from(self.root)
    }

    /// `start` followed by all of its descendants in pre-order.
    #[instrument(level = "trace", skip(self))]
    pub fn to_list_from(&self, start: NodeId) -> Vec<NodeId> {
        self.iter_from(start).map(|(idx, _)| idx).collect()
    }

    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Ancestors of `idx` from its parent up to and including the root.
    #[instrument(level = "trace", skip(self))]
    pub fn path(&self, idx: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.arena.get(idx).and_then(Node::parent);

        while let Some(parent) = current {
            // parent links rewired through set_parent may form a cycle
            if result.len() >= self.arena.len() {
                break;
            }
            result.push(parent);
            current = self.arena.get(parent).and_then(Node::parent);
        }
        result
    }

    /// Strict descendants of `idx` in pre-order.
    #[instrument(level = "trace", skip(self))]
    pub fn subtree(&self, idx: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        self.collect_descendants(idx, &mut result);
        result
    }

    fn collect_descendants(&self, idx: NodeId, result: &mut Vec<NodeId>) {
        let mut stack: Vec<NodeId> = self.children(idx).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
    }

    /// Node with the highest level; ties go to the first one in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn deepest_node(&self) -> NodeId {
        let mut deepest = (self.root, 0);
        for (idx, node) in self.iter() {
            if node.level > deepest.1 {
                deepest = (idx, node.level);
            }
        }
        deepest.0
    }

    /// Level of the deepest node.
    pub fn depth(&self) -> usize {
        self.node(self.deepest_node()).map_or(0, Node::level)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Picks a node uniformly from the pre-order list.
    ///
    /// Without `include_root` the draw is over every node but the root, which needs at
    /// least two nodes.
    #[instrument(level = "trace", skip(self, rng))]
    pub fn random_node<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        include_root: bool,
    ) -> DomainResult<NodeId> {
        let nodes = self.to_list();
        let first = usize::from(!include_root);
        if nodes.len() <= first {
            return Err(DomainError::NotEnoughNodes {
                required: first + 1,
                available: nodes.len(),
            });
        }
        Ok(nodes[rng.gen_range(first..nodes.len())])
    }

    /// Labels of the given nodes, skipping ids that are no longer in the tree.
    pub fn names<'a>(&'a self, nodes: &[NodeId]) -> Vec<&'a str> {
        nodes
            .iter()
            .filter_map(|&idx| self.node(idx))
            .map(Node::name)
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a Tree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
