//! Reference usage scenario.
//!
//! Replays a fixed sequence of inserts, lookups and removals against a fresh
//! [`PrefixTree`] and records every outcome, ending with the teardown.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::info;

use crate::data_structures::prefix_tree::{PrefixTree, PrefixTreeConfig, TeardownReport};
use crate::error::LetterTrieResult;

/// One recorded operation and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Step {
    /// A key was inserted.
    Insert {
        /// Inserted key
        key: String,
        /// Inserted value
        value: i32,
        /// Whether the key was new
        new_key: bool,
    },
    /// A key was looked up.
    Lookup {
        /// Looked-up key
        key: String,
        /// Value found, if any
        value: Option<i32>,
    },
    /// A key was removed.
    Remove {
        /// Removed key
        key: String,
        /// Whether the key was live
        removed: bool,
    },
}

/// Everything the scenario observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Operations in the order they ran
    pub steps: Vec<Step>,

    /// Nodes still allocated right before teardown
    pub nodes_before_teardown: usize,

    /// Result of destroying the tree
    pub teardown: TeardownReport,
}

impl ScenarioReport {
    /// Value recorded by the first lookup of `key`.
    pub fn lookup(&self, key: &str) -> Option<Option<i32>> {
        self.steps.iter().find_map(|step| match step {
            Step::Lookup { key: k, value } if k == key => Some(*value),
            _ => None,
        })
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Insert {
                key,
                value,
                new_key,
            } => {
                let effect = if *new_key { "added" } else { "overwritten" };
                write!(f, "insert {key} = {value} ({effect})")
            }
            Step::Lookup { key, value: Some(value) } => write!(f, "lookup {key}: found {value}"),
            Step::Lookup { key, value: None } => write!(f, "lookup {key}: not found"),
            Step::Remove { key, removed: true } => write!(f, "remove {key}: removed"),
            Step::Remove { key, removed: false } => write!(f, "remove {key}: not found"),
        }
    }
}

impl Display for ScenarioReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        write!(
            f,
            "destroy: {} nodes released, {} keys discarded",
            self.teardown.released_nodes, self.teardown.discarded_keys
        )
    }
}

/// Records every tree operation it forwards.
struct Recorder {
    tree: PrefixTree,
    steps: Vec<Step>,
}

impl Recorder {
    fn insert(&mut self, key: &str, value: i32) -> LetterTrieResult<()> {
        let new_key = self.tree.insert(key, value)?;
        self.record(Step::Insert {
            key: key.to_string(),
            value,
            new_key,
        });
        Ok(())
    }

    fn lookup(&mut self, key: &str) -> LetterTrieResult<()> {
        let value = self.tree.get(key)?;
        self.record(Step::Lookup {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn remove(&mut self, key: &str) -> LetterTrieResult<()> {
        let removed = self.tree.remove(key)?;
        self.record(Step::Remove {
            key: key.to_string(),
            removed,
        });
        Ok(())
    }

    fn record(&mut self, step: Step) {
        info!(%step, "scenario step");
        self.steps.push(step);
    }
}

/// Runs the reference scenario against a tree built from `config`.
///
/// Inserts `aa`, `ab` and `ac`, looks them up along with the absent `ad`,
/// removes `ab`, inserts and reads back `aaak`, then removes every key
/// (including `ab` a second time) and destroys the emptied tree.
pub fn run_reference_scenario(config: PrefixTreeConfig) -> LetterTrieResult<ScenarioReport> {
    let _span = tracing::info_span!("reference_scenario").entered();

    let mut recorder = Recorder {
        tree: PrefixTree::with_config(config)?,
        steps: Vec::new(),
    };

    recorder.insert("aa", 1)?;
    recorder.insert("ab", 2)?;
    recorder.insert("ac", 3)?;
    for key in ["aa", "ab", "ac", "ad"] {
        recorder.lookup(key)?;
    }

    recorder.remove("ab")?;
    recorder.insert("aaak", 10)?;
    recorder.lookup("aaak")?;

    for key in ["aa", "ac", "ab", "aaak"] {
        recorder.remove(key)?;
    }

    let Recorder { tree, steps } = recorder;
    let nodes_before_teardown = tree.node_count();
    let teardown = tree.destroy();

    Ok(ScenarioReport {
        steps,
        nodes_before_teardown,
        teardown,
    })
}
