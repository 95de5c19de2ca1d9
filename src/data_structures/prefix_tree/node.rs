// Copyright (c) 2025 Letter Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the prefix tree.
//!
//! Each node owns up to [`ALPHABET_SIZE`] children in a fixed array indexed by
//! letter. Dropping a node releases its whole subtree without recursion, so
//! arbitrarily long keys cannot exhaust the stack on teardown.

use super::error::{PrefixTreeError, PrefixTreeResult};
use super::key::{slot_char, ALPHABET_SIZE};

/// A node in the prefix tree.
///
/// The root is a sentinel with no character. Every other node stands for one
/// character position of at least one live key.
#[derive(Debug)]
pub(crate) struct TrieNode {
    /// One slot per possible next letter
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],

    /// The letter this node represents (`None` for the root)
    character: Option<char>,

    /// Value of the key that ends exactly here, if any
    value: Option<i32>,
}

impl TrieNode {
    /// Creates the root sentinel with all child slots empty.
    pub(crate) fn root() -> Self {
        Self {
            children: std::array::from_fn(|_| None),
            character: None,
            value: None,
        }
    }

    /// Creates an empty node for child slot `index`.
    fn for_slot(index: usize) -> Self {
        Self {
            children: std::array::from_fn(|_| None),
            character: Some(slot_char(index)),
            value: None,
        }
    }

    pub(crate) fn character(&self) -> Option<char> {
        self.character
    }

    pub(crate) fn value(&self) -> Option<i32> {
        self.value
    }

    /// Stores `value`, returning the value it replaced.
    pub(crate) fn set_value(&mut self, value: i32) -> Option<i32> {
        self.value.replace(value)
    }

    pub(crate) fn take_value(&mut self) -> Option<i32> {
        self.value.take()
    }

    pub(crate) fn child(&self, index: usize) -> Option<&TrieNode> {
        self.children[index].as_deref()
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut TrieNode> {
        self.children[index].as_deref_mut()
    }

    /// Returns the child in slot `index`, allocating it if the slot is empty.
    pub(crate) fn child_or_insert(&mut self, index: usize) -> &mut TrieNode {
        self.children[index].get_or_insert_with(|| Box::new(TrieNode::for_slot(index)))
    }

    /// Detaches the child in slot `index` together with its subtree.
    pub(crate) fn take_child(&mut self, index: usize) -> Option<Box<TrieNode>> {
        self.children[index].take()
    }

    /// Iterates over occupied slots as `(index, child)` pairs.
    pub(crate) fn children(&self) -> impl Iterator<Item = (usize, &TrieNode)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|child| (index, child)))
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.iter().filter(|slot| slot.is_some()).count()
    }

    pub(crate) fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    pub(crate) fn has_multiple_children(&self) -> bool {
        self.children.iter().filter(|slot| slot.is_some()).nth(1).is_some()
    }

    /// A node that must survive the removal of a key passing through it:
    /// it holds a value of its own, or another key branches off here.
    pub(crate) fn is_load_bearing(&self) -> bool {
        self.value.is_some() || self.has_multiple_children()
    }

    /// Counts the nodes below this one.
    pub(crate) fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TrieNode> = self.children().map(|(_, child)| child).collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children().map(|(_, child)| child));
        }
        count
    }

    /// Reserves room to free a chain of `depth` nodes.
    ///
    /// Called before the chain is detached, so a failed reservation leaves
    /// the tree untouched.
    pub(crate) fn chain_buffer(depth: usize) -> PrefixTreeResult<Vec<Box<TrieNode>>> {
        let mut chain = Vec::new();
        chain.try_reserve_exact(depth).map_err(|e| {
            PrefixTreeError::AllocationFailed(format!("pruned chain of {depth} nodes: {e}"))
        })?;
        Ok(chain)
    }

    /// Frees a detached chain of single-child nodes, deepest node first.
    ///
    /// `chain` comes from [`TrieNode::chain_buffer`] sized to the chain depth,
    /// so freeing never allocates. Returns the number of nodes released.
    pub(crate) fn free_chain(mut chain: Vec<Box<TrieNode>>, head: Box<TrieNode>) -> usize {
        debug_assert!(chain.is_empty());
        let reserved = chain.capacity();

        chain.push(head);
        while let Some(next) = chain.last_mut().and_then(|node| node.take_first_child()) {
            chain.push(next);
        }
        debug_assert!(chain.len() <= reserved, "pruned chain outgrew its buffer");

        let freed = chain.len();
        while let Some(node) = chain.pop() {
            drop(node);
        }
        freed
    }

    fn take_first_child(&mut self) -> Option<Box<TrieNode>> {
        debug_assert!(self.child_count() <= 1, "pruned chain must not branch");
        self.children.iter_mut().find_map(Option::take)
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<Box<TrieNode>> =
            self.children.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.iter_mut().filter_map(Option::take));
        }
    }
}
