//! Letter Trie Library
//!
//! An associative container keyed by lowercase ASCII strings, backed by a
//! 26-way prefix tree whose removals prune every node that no live key needs.
//!
//! The library holds the tree itself ([`data_structures::prefix_tree`]), the
//! crate-wide error types, layered configuration, and the reference usage
//! scenario driven by the `letter_trie` binary.

pub mod config;
pub mod data_structures;
pub mod demo;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;
