//! Integration tests for the prefix tree public API.

use letter_trie_lib::config::tree::TreeConfig;
use letter_trie_lib::data_structures::prefix_tree::{
    PrefixTree, PrefixTreeConfig, PrefixTreeError, ALPHABET_SIZE,
};
use letter_trie_lib::demo::{run_reference_scenario, Step};
use letter_trie_lib::error::LetterTrieError;

#[test]
fn test_end_to_end_scenario() {
    let mut tree = PrefixTree::new();

    tree.insert("aa", 1).unwrap();
    tree.insert("ab", 2).unwrap();
    tree.insert("ac", 3).unwrap();

    assert_eq!(tree.get("aa").unwrap(), Some(1));
    assert_eq!(tree.get("ab").unwrap(), Some(2));
    assert_eq!(tree.get("ac").unwrap(), Some(3));
    assert_eq!(tree.get("ad").unwrap(), None);

    assert!(tree.remove("ab").unwrap());
    tree.insert("aaak", 10).unwrap();
    assert_eq!(tree.get("aaak").unwrap(), Some(10));

    assert!(tree.remove("aa").unwrap());
    assert!(tree.remove("ac").unwrap());
    assert!(!tree.remove("ab").unwrap());
    assert!(tree.remove("aaak").unwrap());

    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
    assert!(tree.destroy().was_empty());
}

#[test]
fn test_every_first_letter() {
    let mut tree = PrefixTree::new();
    let letters: Vec<String> = ('a'..='z').map(String::from).collect();
    assert_eq!(letters.len(), ALPHABET_SIZE);

    for (value, key) in letters.iter().enumerate() {
        tree.insert(key, value as i32).unwrap();
    }
    assert_eq!(tree.node_count(), ALPHABET_SIZE);

    for (value, key) in letters.iter().enumerate() {
        assert_eq!(tree.get(key).unwrap(), Some(value as i32));
        assert!(tree.remove(key).unwrap());
    }
    assert_eq!(tree.node_count(), 0);
}

#[test]
fn test_reference_scenario_report() {
    let report = run_reference_scenario(PrefixTreeConfig::default()).unwrap();

    assert_eq!(report.steps.len(), 14);
    assert_eq!(
        report.steps.last(),
        Some(&Step::Remove {
            key: "aaak".to_string(),
            removed: true,
        })
    );
    assert!(report.teardown.was_empty());
}

#[test]
fn test_configured_limits_surface_as_crate_errors() {
    let config = TreeConfig {
        max_key_length: Some(2),
        max_nodes: None,
    };

    let result = run_reference_scenario(config.to_tree_config());
    assert!(matches!(
        result,
        Err(LetterTrieError::Tree(PrefixTreeError::KeyTooLong {
            length: 4,
            max_length: 2,
        }))
    ));
}
