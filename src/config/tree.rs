//! Prefix tree configuration module.
//!
//! Limits applied to every tree built from the loaded configuration.

use super::{ConfigResult, Validate};
use crate::data_structures::prefix_tree::PrefixTreeConfig;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Prefix tree configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeConfig {
    /// Longest accepted key in bytes (unbounded when absent)
    pub max_key_length: Option<usize>,

    /// Node budget per tree (unbounded when absent)
    pub max_nodes: Option<usize>,
}

impl Validate for TreeConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.to_tree_config()
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

impl TreeConfig {
    /// Build the tree-level configuration.
    pub fn to_tree_config(&self) -> PrefixTreeConfig {
        let mut config = PrefixTreeConfig::new();
        if let Some(max_key_length) = self.max_key_length {
            config = config.with_max_key_length(max_key_length);
        }
        if let Some(max_nodes) = self.max_nodes {
            config = config.with_max_nodes(max_nodes);
        }
        config
    }
}
