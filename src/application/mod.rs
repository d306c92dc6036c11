//! Application layer: tree generation
//!
//! This layer drives the domain model, it performs no I/O.

pub mod error;
pub mod generator;
pub mod params;

pub use error::{ApplicationError, ApplicationResult};
pub use generator::{build_tree, TreeGenerator};
pub use params::TreeParams;
