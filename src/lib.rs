//! Random tree generator for hierarchical test fixtures.
//!
//! Builds rooted, ordered trees of labelled nodes whose shape is steered by a node
//! count, a minimum depth and a minimum width:
//!
//! ```
//! use treegen::{TreeGenerator, TreeParams};
//!
//! let tree = TreeGenerator::seeded(42)
//!     .build_tree(&TreeParams::new(10, 3, 2))
//!     .unwrap();
//! assert_eq!(tree.size(), 10);
//! assert!(tree.depth() >= 3);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{build_tree, TreeGenerator, TreeParams};
pub use domain::{DomainError, Node, NodeId, Tree, ROOT_NODE_NAME};
