//! Domain layer: the tree model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod display;
pub mod error;

pub use arena::{Node, NodeId, PreOrderIterator, Tree, ROOT_NODE_NAME};
pub use display::TreeDisplay;
pub use error::{DomainError, DomainResult};
