// Copyright (c) 2025 Letter Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Prefix tree keyed by lowercase ASCII strings.
//!
//! A 26-way trie mapping keys over `a`..=`z` to `i32` values. Keys sharing a
//! prefix share the nodes for that prefix. Removal prunes the tree back to the
//! deepest node that is still needed, either because it holds a value or
//! because another key branches off there, so no dead chains are left behind.
//!
//! # Example
//!
//! ```
//! use letter_trie_lib::data_structures::prefix_tree::PrefixTree;
//!
//! let mut tree = PrefixTree::new();
//! tree.insert("aa", 1).unwrap();
//! tree.insert("ab", 2).unwrap();
//!
//! assert_eq!(tree.get("ab").unwrap(), Some(2));
//! assert_eq!(tree.get("ad").unwrap(), None);
//!
//! assert!(tree.remove("ab").unwrap());
//! assert!(tree.remove("aa").unwrap());
//! assert_eq!(tree.node_count(), 0);
//! assert!(tree.destroy().was_empty());
//! ```
//!
//! # Invalid keys
//!
//! Any character outside `a`..=`z` is rejected before the tree is touched:
//!
//! ```
//! use letter_trie_lib::data_structures::prefix_tree::{PrefixTree, PrefixTreeError};
//!
//! let mut tree = PrefixTree::new();
//! assert!(matches!(
//!     tree.insert("Key1", 5),
//!     Err(PrefixTreeError::InvalidKey { position: 0, .. })
//! ));
//! assert!(tree.is_empty());
//! ```

mod config;
mod error;
mod key;
mod node;
mod tree;

#[cfg(test)]
mod tests;

// Re-exports
pub use config::PrefixTreeConfig;
pub use error::{PrefixTreeError, PrefixTreeResult};
pub use key::{key_permitted, validate_key, ALPHABET_SIZE};
pub use tree::{PrefixTree, TeardownReport};
