//! Data structures for the Letter Trie crate.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Explicit error results instead of panics on bad input
//! - Stack usage independent of key length

pub mod prefix_tree;

// Re-export common data structures
pub use prefix_tree::{PrefixTree, PrefixTreeConfig, PrefixTreeError, PrefixTreeResult};
