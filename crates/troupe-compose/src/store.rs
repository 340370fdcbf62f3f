// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
use std::collections::HashMap;

use troupe_config::{AgentSpec, Config};

/// Read-only store of declared agent specs, keyed by agent key.
///
/// Built once from a loaded [`Config`]; never mutated afterwards.  The
/// resolver consults it to decide whether a capability reference is a
/// sub-agent (`contains`) and to fetch the spec when recursing.
#[derive(Debug, Clone, Default)]
pub struct SpecStore {
    specs: HashMap<String, AgentSpec>,
}

impl SpecStore {
    pub fn from_config(config: &Config) -> Self {
        Self {
            specs: config.agents.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AgentSpec> {
        self.specs.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.specs.contains_key(key)
    }

    /// All declared agent keys, sorted for deterministic listing.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.specs.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(keys: &[&str]) -> Config {
        let mut config = Config::default();
        for k in keys {
            config.agents.insert(
                k.to_string(),
                AgentSpec {
                    name: k.to_string(),
                    instruction: "test".into(),
                    tools: vec![],
                    output_key: None,
                },
            );
        }
        config
    }

    #[test]
    fn from_config_copies_all_specs() {
        let store = SpecStore::from_config(&config_with(&["a", "b"]));
        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
        assert!(store.get("b").is_some());
    }

    #[test]
    fn get_unknown_returns_none() {
        let store = SpecStore::from_config(&config_with(&[]));
        assert!(store.get("missing").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let store = SpecStore::from_config(&config_with(&["zeta", "alpha", "mid"]));
        assert_eq!(store.keys(), vec!["alpha", "mid", "zeta"]);
    }
}
