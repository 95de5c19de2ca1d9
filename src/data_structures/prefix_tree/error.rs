// Copyright (c) 2025 Letter Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the prefix tree.

/// Errors that can occur in prefix tree operations.
///
/// A missing key is not an error: lookups report it as `None` and removals
/// as `false`.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PrefixTreeError {
    /// The key contains a character outside `a`..=`z`.
    #[error("Invalid key '{key}': character {character:?} at byte {position} is not a lowercase ASCII letter")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Byte offset of the first offending character.
        position: usize,
        /// The first offending character.
        character: char,
    },

    /// The key is longer than the configured maximum.
    #[error("Key of length {length} exceeds maximum key length of {max_length}")]
    KeyTooLong {
        /// Length of the rejected key.
        length: usize,
        /// The configured maximum.
        max_length: usize,
    },

    /// A node or scratch buffer could not be obtained.
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    /// The tree configuration is not usable.
    #[error("Invalid tree configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for prefix tree operations.
pub type PrefixTreeResult<T> = std::result::Result<T, PrefixTreeError>;
