// Copyright (c) 2025 Letter Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Unit tests for the prefix tree.

use std::sync::Arc;
use std::thread;

use parking_lot::RwLock;
use test_case::test_case;

use crate::data_structures::prefix_tree::{PrefixTree, PrefixTreeConfig, PrefixTreeError};

#[test]
fn test_basic_operations() {
    let mut tree = PrefixTree::new();

    // Test initial state
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);

    // Test insertion
    assert!(tree.insert("hello", 1).unwrap());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.node_count(), 5);

    // Test retrieval
    assert_eq!(tree.get("hello").unwrap(), Some(1));
    assert!(tree.contains_key("hello").unwrap());
    assert_eq!(tree.get("hell").unwrap(), None);
    assert_eq!(tree.get("helloo").unwrap(), None);
    assert!(!tree.contains_key("world").unwrap());

    // Test removal
    assert!(tree.remove("hello").unwrap());
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
    assert!(!tree.remove("hello").unwrap());
    tree.assert_invariants();
}

#[test]
fn test_overwrite_keeps_latest_value_and_shape() {
    let mut tree = PrefixTree::new();
    assert!(tree.insert("key", 1).unwrap());
    let nodes = tree.node_count();

    assert!(!tree.insert("key", 2).unwrap());
    assert_eq!(tree.get("key").unwrap(), Some(2));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.node_count(), nodes);
    tree.assert_invariants();
}

#[test]
fn test_insertion_order_does_not_matter() {
    let mut forward = PrefixTree::new();
    forward.insert("ab", 1).unwrap();
    forward.insert("abc", 2).unwrap();

    let mut backward = PrefixTree::new();
    backward.insert("abc", 2).unwrap();
    backward.insert("ab", 1).unwrap();

    for tree in [&forward, &backward] {
        assert_eq!(tree.get("ab").unwrap(), Some(1));
        assert_eq!(tree.get("abc").unwrap(), Some(2));
        assert_eq!(tree.node_count(), 3);
        tree.assert_invariants();
    }
}

#[test]
fn test_prefix_sharing_and_sibling_removal() {
    let mut tree = PrefixTree::new();
    tree.insert("aa", 1).unwrap();
    tree.insert("ab", 2).unwrap();
    tree.insert("ac", 3).unwrap();

    // One shared `a` plus three second-level nodes
    assert_eq!(tree.node_count(), 4);

    assert!(tree.remove("ab").unwrap());
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.get("aa").unwrap(), Some(1));
    assert_eq!(tree.get("ab").unwrap(), None);
    assert_eq!(tree.get("ac").unwrap(), Some(3));
    tree.assert_invariants();
}

#[test]
fn test_removing_prefix_key_keeps_longer_key() {
    let mut tree = PrefixTree::new();
    tree.insert("aa", 1).unwrap();
    tree.insert("aaak", 10).unwrap();
    assert_eq!(tree.node_count(), 4);

    assert!(tree.remove("aa").unwrap());
    assert_eq!(tree.get("aa").unwrap(), None);
    assert_eq!(tree.get("aaak").unwrap(), Some(10));
    assert_eq!(tree.node_count(), 4);
    tree.assert_invariants();
}

#[test]
fn test_prune_stops_at_ancestor_with_value() {
    let mut tree = PrefixTree::new();
    tree.insert("ab", 1).unwrap();
    tree.insert("abcd", 2).unwrap();

    assert!(tree.remove("abcd").unwrap());
    assert_eq!(tree.get("ab").unwrap(), Some(1));
    assert_eq!(tree.node_count(), 2);
    tree.assert_invariants();
}

#[test]
fn test_prune_stops_at_deepest_branching_ancestor() {
    let mut tree = PrefixTree::new();
    tree.insert("xabc", 1).unwrap();
    tree.insert("xabd", 2).unwrap();
    tree.insert("xz", 3).unwrap();
    assert_eq!(tree.node_count(), 6);

    assert!(tree.remove("xabd").unwrap());
    assert_eq!(tree.node_count(), 5);

    // `x` still branches to `z`, but `a` and `b` no longer branch
    assert!(tree.remove("xabc").unwrap());
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.get("xz").unwrap(), Some(3));
    tree.assert_invariants();
}

#[test]
fn test_removing_nested_keys_in_mixed_order() {
    let mut tree = PrefixTree::new();
    for (key, value) in [("a", 1), ("abc", 2), ("abd", 3), ("abdz", 4), ("q", 5)] {
        tree.insert(key, value).unwrap();
    }
    assert_eq!(tree.node_count(), 6);

    // (key, nodes left after removing it)
    for (key, nodes) in [("abd", 6), ("abdz", 4), ("a", 4), ("q", 3), ("abc", 0)] {
        assert!(tree.remove(key).unwrap());
        assert_eq!(tree.node_count(), nodes, "after removing {key}");
        tree.assert_invariants();
    }
    assert!(tree.is_empty());
}

#[test]
fn test_single_letter_leaf_clears_root_slot() {
    let mut tree = PrefixTree::new();
    tree.insert("z", 26).unwrap();
    assert_eq!(tree.node_count(), 1);

    assert!(tree.remove("z").unwrap());
    assert_eq!(tree.node_count(), 0);
    assert!(tree.is_empty());
    tree.assert_invariants();
}

#[test]
fn test_removing_missing_keys_changes_nothing() {
    let mut tree = PrefixTree::new();
    tree.insert("abc", 1).unwrap();

    // Path missing entirely, path partially present, and prefix-only node
    assert!(!tree.remove("zzz").unwrap());
    assert!(!tree.remove("abcd").unwrap());
    assert!(!tree.remove("ab").unwrap());
    assert!(!tree.remove("").unwrap());

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.get("abc").unwrap(), Some(1));
    tree.assert_invariants();
}

#[test]
fn test_empty_key_addresses_root() {
    let mut tree = PrefixTree::new();
    assert_eq!(tree.get("").unwrap(), None);

    assert!(tree.insert("", 42).unwrap());
    tree.insert("a", 1).unwrap();
    assert_eq!(tree.get("").unwrap(), Some(42));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.node_count(), 1);

    assert!(tree.remove("").unwrap());
    assert_eq!(tree.get("").unwrap(), None);
    assert_eq!(tree.get("a").unwrap(), Some(1));

    assert!(tree.remove("a").unwrap());
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
    tree.assert_invariants();
}

#[test_case("Aa" ; "uppercase")]
#[test_case("a1" ; "digit")]
#[test_case("a_b" ; "symbol")]
#[test_case("a b" ; "whitespace")]
#[test_case("na\u{ef}ve" ; "non ascii")]
fn test_rejected_keys_leave_tree_untouched(key: &str) {
    let mut tree = PrefixTree::new();
    tree.insert("a", 1).unwrap();

    assert!(matches!(
        tree.insert(key, 2),
        Err(PrefixTreeError::InvalidKey { .. })
    ));
    assert!(matches!(tree.get(key), Err(PrefixTreeError::InvalidKey { .. })));
    assert!(matches!(
        tree.remove(key),
        Err(PrefixTreeError::InvalidKey { .. })
    ));

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.get("a").unwrap(), Some(1));
    tree.assert_invariants();
}

#[test]
fn test_max_key_length() {
    let config = PrefixTreeConfig::new().with_max_key_length(3);
    let mut tree = PrefixTree::with_config(config.clone()).unwrap();
    assert_eq!(tree.config(), &config);

    assert!(tree.insert("abc", 1).unwrap());
    assert_eq!(
        tree.insert("abcd", 2),
        Err(PrefixTreeError::KeyTooLong {
            length: 4,
            max_length: 3,
        })
    );
    assert!(tree.get("abcd").is_err());
    assert!(tree.remove("abcd").is_err());
    assert_eq!(tree.node_count(), 3);
}

#[test]
fn test_node_budget_failure_keeps_created_prefix() {
    let config = PrefixTreeConfig::new().with_max_nodes(4);
    let mut tree = PrefixTree::with_config(config).unwrap();
    tree.insert("ab", 1).unwrap();

    // `x` and `y` fit in the budget, `z` does not
    let result = tree.insert("xyz", 2);
    assert!(matches!(result, Err(PrefixTreeError::AllocationFailed(_))));
    assert_eq!(tree.get("xyz").unwrap(), None);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.node_count(), 4);

    // The leftover prefix nodes are reused rather than reallocated
    assert!(tree.insert("xy", 3).unwrap());
    assert_eq!(tree.node_count(), 4);
    tree.assert_invariants();

    // Freed nodes return to the budget
    assert!(tree.remove("ab").unwrap());
    assert!(tree.insert("xyz", 2).unwrap());
    assert_eq!(tree.get("xyz").unwrap(), Some(2));
    tree.assert_invariants();
}

#[test]
fn test_invalid_config_rejected() {
    let result = PrefixTree::with_config(PrefixTreeConfig::new().with_max_nodes(0));
    assert!(matches!(
        result,
        Err(PrefixTreeError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_clear() {
    let mut tree = PrefixTree::new();
    for (i, key) in ["one", "two", "three", "four"].iter().enumerate() {
        tree.insert(key, i as i32).unwrap();
    }

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
    assert_eq!(tree.get("one").unwrap(), None);
    tree.assert_invariants();

    // Usable after clearing
    tree.insert("one", 1).unwrap();
    assert_eq!(tree.get("one").unwrap(), Some(1));
}

#[test]
fn test_destroy_reports_leftovers() {
    let mut tree = PrefixTree::new();
    tree.insert("aa", 1).unwrap();
    tree.insert("ab", 2).unwrap();

    let report = tree.destroy();
    assert!(!report.was_empty());
    assert_eq!(report.released_nodes, 3);
    assert_eq!(report.discarded_keys, 2);
}

#[test]
fn test_destroy_after_removing_everything() {
    let mut tree = PrefixTree::new();
    tree.insert("aa", 1).unwrap();
    tree.remove("aa").unwrap();

    assert!(tree.destroy().was_empty());
}

#[test]
fn test_very_long_key() {
    let key = "abcdefghijklmnopqrstuvwxyz".repeat(4_000);
    let mut tree = PrefixTree::new();

    tree.insert(&key, 7).unwrap();
    assert_eq!(tree.node_count(), key.len());
    assert_eq!(tree.get(&key).unwrap(), Some(7));

    assert!(tree.remove(&key).unwrap());
    assert_eq!(tree.node_count(), 0);

    // Dropping a deep tree must not recurse
    tree.insert(&key, 8).unwrap();
    drop(tree);
}

/// The tree has no internal locking; shared use goes through an external lock.
#[test]
fn test_shared_behind_lock() {
    const THREAD_COUNT: usize = 4;
    const KEYS_PER_THREAD: usize = 50;

    let tree = Arc::new(RwLock::new(PrefixTree::new()));
    let letters: Vec<char> = ('a'..='z').collect();

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|thread_id| {
            let tree = Arc::clone(&tree);
            let letters = letters.clone();
            thread::spawn(move || {
                for j in 0..KEYS_PER_THREAD {
                    let key: String = [letters[thread_id], letters[j % 26], letters[j / 26]]
                        .iter()
                        .collect();
                    tree.write().insert(&key, (thread_id * 100 + j) as i32).unwrap();
                    assert_eq!(tree.read().get(&key).unwrap(), Some((thread_id * 100 + j) as i32));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let tree = tree.read();
    assert_eq!(tree.len(), THREAD_COUNT * KEYS_PER_THREAD);
    tree.assert_invariants();
}
