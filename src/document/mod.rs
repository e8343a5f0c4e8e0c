//! Document model: the closed node set, its conversions, and loaded trees.

pub mod node;
pub mod parser;
pub mod tree;

pub use node::{Key, Kind, Number, Value};
pub use tree::DocumentTree;
