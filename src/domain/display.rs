//! Rendering of trees as box-drawing text via `termtree`.

use std::fmt;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};

pub trait TreeDisplay {
    fn to_termtree(&self) -> TermTree<String>;
}

impl TreeDisplay for Tree {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> TermTree<String> {
        fn build_tree(tree: &Tree, node_idx: NodeId, parent_tree: &mut TermTree<String>) {
            for &child_idx in tree.children(node_idx) {
                if let Some(child) = tree.node(child_idx) {
                    let mut child_tree = TermTree::new(child.name().to_string());
                    build_tree(tree, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let root_name = self
            .node(self.root())
            .map(|node| node.name().to_string())
            .unwrap_or_default();
        let mut rendered = TermTree::new(root_name);
        build_tree(self, self.root(), &mut rendered);
        rendered
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_termtree())
    }
}
