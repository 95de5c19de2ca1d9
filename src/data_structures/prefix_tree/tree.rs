// Copyright (c) 2025 Letter Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The prefix tree container.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::config::PrefixTreeConfig;
use super::error::{PrefixTreeError, PrefixTreeResult};
use super::key::{slot_index, validate_key};
use super::node::TrieNode;

/// What removing a live key does to the tree's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    /// The terminal node still leads to other keys (or is the root):
    /// only its value goes away.
    ClearValue,

    /// The terminal node is a leaf. The chain hanging below the node reached
    /// after `parent_depth` key bytes is detached and freed.
    Prune { parent_depth: usize },
}

/// Summary of a [`PrefixTree::destroy`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeardownReport {
    /// Non-root nodes released by the teardown.
    pub released_nodes: usize,

    /// Keys that were still live when the tree was destroyed.
    pub discarded_keys: usize,
}

impl TeardownReport {
    /// `true` if the tree had already been emptied by its caller.
    pub fn was_empty(&self) -> bool {
        self.released_nodes == 0 && self.discarded_keys == 0
    }
}

/// Associative container keyed by lowercase ASCII strings.
///
/// Every node has 26 child slots, one per letter. Insertion creates nodes
/// lazily along the key; removal frees every node that only existed for the
/// removed key, so after removing all keys the root is left with no children.
///
/// The tree performs no internal synchronization. Mutators take `&mut self`;
/// callers sharing a tree across threads wrap it in a lock.
#[derive(Debug)]
pub struct PrefixTree {
    /// Sentinel root, never removed
    root: TrieNode,

    /// Number of live keys
    len: usize,

    /// Number of allocated non-root nodes
    node_count: usize,

    /// Limits applied to keys and node allocation
    config: PrefixTreeConfig,
}

impl PrefixTree {
    /// Creates a new empty `PrefixTree` with no limits.
    pub fn new() -> Self {
        Self {
            root: TrieNode::root(),
            len: 0,
            node_count: 0,
            config: PrefixTreeConfig::default(),
        }
    }

    /// Creates a new empty `PrefixTree` with the specified configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixTreeError::InvalidConfiguration`] if `config` fails validation.
    pub fn with_config(config: PrefixTreeConfig) -> PrefixTreeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Inserts `value` under `key`, overwriting any previous value.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - `key` was not live before.
    /// * `Ok(false)` - an existing value for `key` was replaced.
    /// * `Err(PrefixTreeError)` - `key` was rejected or a node could not be allocated.
    ///
    /// On allocation failure the nodes already created for earlier characters
    /// of `key` stay in place as valid prefix nodes; the value is not stored.
    pub fn insert(&mut self, key: &str, value: i32) -> PrefixTreeResult<bool> {
        let bytes = self.check_key(key)?;
        let max_nodes = self.config.max_nodes();
        let mut created = 0usize;

        let mut node = &mut self.root;
        for (depth, &byte) in bytes.iter().enumerate() {
            let index = slot_index(byte);
            if node.child(index).is_none() {
                if let Some(max) = max_nodes {
                    if self.node_count >= max {
                        debug!(key, depth, created, max_nodes = max, "node budget exhausted");
                        return Err(PrefixTreeError::AllocationFailed(format!(
                            "node budget of {max} exhausted at depth {depth} of key '{key}'"
                        )));
                    }
                }
                self.node_count += 1;
                created += 1;
                trace!(key, depth, "allocated node");
            }
            node = node.child_or_insert(index);
        }

        let is_new = node.set_value(value).is_none();
        if is_new {
            self.len += 1;
        }

        debug!(key, value, created, is_new, "inserted key");
        Ok(is_new)
    }

    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - `key` is live.
    /// * `Ok(None)` - `key` is not live, including when it is only a prefix of live keys.
    /// * `Err(PrefixTreeError)` - `key` was rejected.
    pub fn get(&self, key: &str) -> PrefixTreeResult<Option<i32>> {
        let bytes = self.check_key(key)?;
        Ok(self.descend(bytes).and_then(TrieNode::value))
    }

    /// Checks if `key` is live.
    pub fn contains_key(&self, key: &str) -> PrefixTreeResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Removes `key` and frees every node that only existed to reach it.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - `key` was removed.
    /// * `Ok(false)` - `key` was not live; the tree is unchanged.
    /// * `Err(PrefixTreeError)` - `key` was rejected or a removal buffer could not be
    ///   allocated; the tree is unchanged.
    pub fn remove(&mut self, key: &str) -> PrefixTreeResult<bool> {
        let bytes = self.check_key(key)?;

        let Some(removal) = self.plan_removal(bytes)? else {
            debug!(key, "key not found for removal");
            return Ok(false);
        };

        match removal {
            Removal::ClearValue => {
                // Path was verified by plan_removal.
                let Some(node) = self.descend_mut(bytes) else {
                    return Ok(false);
                };
                node.take_value();
                debug!(key, "cleared value, node kept as prefix");
            }
            Removal::Prune { parent_depth } => {
                let buffer = TrieNode::chain_buffer(bytes.len() - parent_depth)?;
                let index = slot_index(bytes[parent_depth]);
                let Some(chain) = self
                    .descend_mut(&bytes[..parent_depth])
                    .and_then(|parent| parent.take_child(index))
                else {
                    return Ok(false);
                };
                let cut_at = chain.character();
                let freed = TrieNode::free_chain(buffer, chain);
                self.node_count -= freed;
                debug!(key, freed, parent_depth, ?cut_at, "removed key and pruned chain");
            }
        }

        self.len -= 1;
        Ok(true)
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if the tree holds no live keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated nodes, not counting the root.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the configuration this tree was created with.
    pub fn config(&self) -> &PrefixTreeConfig {
        &self.config
    }

    /// Removes every key and releases every node except the root.
    pub fn clear(&mut self) {
        self.root = TrieNode::root();
        self.len = 0;
        self.node_count = 0;
    }

    /// Tears the tree down, releasing every node.
    ///
    /// Callers are expected to have removed every key first. A tree that still
    /// holds keys is torn down anyway and the leftovers are logged and reported.
    pub fn destroy(mut self) -> TeardownReport {
        debug_assert_eq!(self.root.descendant_count(), self.node_count);
        let report = TeardownReport {
            released_nodes: self.node_count,
            discarded_keys: self.len,
        };

        if !report.was_empty() {
            warn!(
                released_nodes = report.released_nodes,
                discarded_keys = report.discarded_keys,
                "destroying a prefix tree that still holds keys"
            );
        }

        self.clear();
        report
    }

    /// Validates `key` against the alphabet and the configured length limit.
    fn check_key<'k>(&self, key: &'k str) -> PrefixTreeResult<&'k [u8]> {
        validate_key(key)?;
        if let Some(max_length) = self.config.max_key_length() {
            if key.len() > max_length {
                return Err(PrefixTreeError::KeyTooLong {
                    length: key.len(),
                    max_length,
                });
            }
        }
        Ok(key.as_bytes())
    }

    fn descend(&self, bytes: &[u8]) -> Option<&TrieNode> {
        bytes
            .iter()
            .try_fold(&self.root, |node, &byte| node.child(slot_index(byte)))
    }

    fn descend_mut(&mut self, bytes: &[u8]) -> Option<&mut TrieNode> {
        bytes
            .iter()
            .try_fold(&mut self.root, |node, &byte| node.child_mut(slot_index(byte)))
    }

    /// Walks the path of `bytes` and decides how to remove it.
    ///
    /// Returns `None` if the key is not live.
    fn plan_removal(&self, bytes: &[u8]) -> PrefixTreeResult<Option<Removal>> {
        let mut path: Vec<&TrieNode> = Vec::new();
        path.try_reserve_exact(bytes.len()).map_err(|e| {
            PrefixTreeError::AllocationFailed(format!(
                "removal path of {} nodes: {e}",
                bytes.len()
            ))
        })?;

        let mut node = &self.root;
        for &byte in bytes {
            match node.child(slot_index(byte)) {
                Some(child) => {
                    path.push(child);
                    node = child;
                }
                None => return Ok(None),
            }
        }

        if node.value().is_none() {
            return Ok(None);
        }
        if bytes.is_empty() || node.has_children() {
            return Ok(Some(Removal::ClearValue));
        }

        // path[i] sits at depth i + 1. The terminal node itself is excluded.
        let anchor = path[..path.len() - 1]
            .iter()
            .rposition(|node| node.is_load_bearing());
        let parent_depth = anchor.map_or(0, |i| i + 1);

        Ok(Some(Removal::Prune { parent_depth }))
    }

    /// Walks the whole tree and asserts its structural invariants.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use super::key::slot_char;

        assert_eq!(self.root.character(), None, "root must not carry a character");

        let mut nodes = 0usize;
        let mut values = usize::from(self.root.value().is_some());
        let mut stack: Vec<(usize, &TrieNode)> = self.root.children().collect();
        while let Some((index, node)) = stack.pop() {
            nodes += 1;
            assert_eq!(node.character(), Some(slot_char(index)), "node label must match its slot");
            assert!(
                node.value().is_some() || node.has_children(),
                "dangling node {:?} with no value and no children",
                node.character()
            );
            values += usize::from(node.value().is_some());
            stack.extend(node.children());
        }

        assert_eq!(nodes, self.node_count, "node counter out of sync");
        assert_eq!(nodes, self.root.descendant_count());
        assert_eq!(values, self.len, "key counter out of sync");
    }
}

impl Default for PrefixTree {
    fn default() -> Self {
        Self::new()
    }
}
