//! Random tree construction under depth and width guarantees.
//!
//! Generation runs three phases on a tree that starts as a lone root:
//! 1. fill: attach children to uniformly drawn nodes
//! 2. deep branch: grow a chain of `min_depth` nodes below one drawn anchor
//! 3. wide branch: hang `min_width` children directly off another drawn anchor
//!
//! Every anchor draw includes the root and is independent of the others.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::application::params::TreeParams;
use crate::domain::{DomainResult, NodeId, Tree};

/// Builds random trees, owning one RNG for all runs.
#[derive(Debug)]
pub struct TreeGenerator<R: Rng = StdRng> {
    rng: R,
}

impl TreeGenerator<StdRng> {
    /// Reproducible generator: the same seed and parameters give the same tree.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> TreeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Builds a tree of `1 + fill_count + min_depth + min_width` nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn build_tree(&mut self, params: &TreeParams) -> DomainResult<Tree> {
        let params = params.clamped();
        let mut tree = Tree::default();

        self.fill(&mut tree, params.fill_count())?;
        if params.depth() > 0 {
            self.deep_branch(&mut tree, params.depth())?;
        }
        if params.width() > 0 {
            self.wide_branch(&mut tree, params.width())?;
        }

        debug!(size = tree.size(), depth = tree.depth(), "tree generated");
        Ok(tree)
    }

    fn fill(&mut self, tree: &mut Tree, count: usize) -> DomainResult<()> {
        debug!(count, "fill phase");
        for _ in 0..count {
            let parent = tree.random_node(&mut self.rng, true)?;
            tree.insert_child(parent)?;
        }
        Ok(())
    }

    fn deep_branch(&mut self, tree: &mut Tree, depth: usize) -> DomainResult<()> {
        let anchor = tree.random_node(&mut self.rng, true)?;
        debug!(anchor = %anchor_name(tree, anchor), depth, "deep branch phase");

        let mut last = anchor;
        for _ in 0..depth {
            last = tree.insert_child(last)?;
        }
        Ok(())
    }

    fn wide_branch(&mut self, tree: &mut Tree, width: usize) -> DomainResult<()> {
        let anchor = tree.random_node(&mut self.rng, true)?;
        debug!(anchor = %anchor_name(tree, anchor), width, "wide branch phase");

        for _ in 0..width {
            tree.insert_child(anchor)?;
        }
        Ok(())
    }
}

fn anchor_name(tree: &Tree, anchor: NodeId) -> &str {
    tree.node(anchor).map_or("", |node| node.name())
}

/// Builds a tree with a freshly seeded generator.
pub fn build_tree(node_count: i64, min_depth: i64, min_width: i64) -> DomainResult<Tree> {
    TreeGenerator::from_entropy().build_tree(&TreeParams::new(node_count, min_depth, min_width))
}
