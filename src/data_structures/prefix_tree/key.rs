// Copyright (c) 2025 Letter Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key validation and slot indexing.
//!
//! Keys are strings over `a`..=`z`. Each byte of a permitted key maps to one of
//! the [`ALPHABET_SIZE`] child slots of a node.

use super::error::{PrefixTreeError, PrefixTreeResult};

/// Number of child slots per node, one per lowercase ASCII letter.
pub const ALPHABET_SIZE: usize = 26;

/// Checks that every character of `key` is a lowercase ASCII letter.
///
/// The empty key is permitted and addresses the root.
///
/// # Errors
///
/// Returns [`PrefixTreeError::InvalidKey`] naming the first offending character.
pub fn validate_key(key: &str) -> PrefixTreeResult<()> {
    match key.char_indices().find(|(_, c)| !c.is_ascii_lowercase()) {
        Some((position, character)) => Err(PrefixTreeError::InvalidKey {
            key: key.to_string(),
            position,
            character,
        }),
        None => Ok(()),
    }
}

/// Returns `true` if `key` would pass [`validate_key`].
pub fn key_permitted(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_lowercase())
}

/// Maps a validated key byte to its child slot.
#[inline]
pub(crate) fn slot_index(byte: u8) -> usize {
    debug_assert!(byte.is_ascii_lowercase());
    usize::from(byte - b'a')
}

/// Maps a child slot back to its letter.
#[inline]
pub(crate) fn slot_char(index: usize) -> char {
    debug_assert!(index < ALPHABET_SIZE);
    char::from(b'a' + index as u8)
}
