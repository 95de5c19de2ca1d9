// Copyright (c) 2025 Letter Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the prefix tree.

use super::error::{PrefixTreeError, PrefixTreeResult};

/// Limits applied by a [`PrefixTree`](super::PrefixTree).
///
/// Both limits are off by default, so keys of any length are accepted and
/// nodes are allocated until memory runs out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTreeConfig {
    /// Longest key accepted by insert, lookup and remove.
    max_key_length: Option<usize>,

    /// Maximum number of non-root nodes the tree may hold at once.
    /// Creating a node past this budget fails like an allocation failure.
    max_nodes: Option<usize>,
}

impl PrefixTreeConfig {
    /// Create a configuration with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject keys longer than `max_key_length` bytes.
    pub fn with_max_key_length(mut self, max_key_length: usize) -> Self {
        self.max_key_length = Some(max_key_length);
        self
    }

    /// Cap the number of nodes the tree may allocate.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Get the maximum key length, if any.
    pub fn max_key_length(&self) -> Option<usize> {
        self.max_key_length
    }

    /// Get the node budget, if any.
    pub fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Check that the configured limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixTreeError::InvalidConfiguration`] if a limit is zero.
    pub fn validate(&self) -> PrefixTreeResult<()> {
        if self.max_key_length == Some(0) {
            return Err(PrefixTreeError::InvalidConfiguration(
                "max_key_length must be greater than 0".to_string(),
            ));
        }
        if self.max_nodes == Some(0) {
            return Err(PrefixTreeError::InvalidConfiguration(
                "max_nodes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
