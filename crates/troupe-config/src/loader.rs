// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError};

/// Ordered list of config file locations searched from lowest to highest
/// priority.  Later files override earlier ones.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide default
    paths.push(PathBuf::from("/etc/troupe/agents.yaml"));

    // 2. XDG / home
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/troupe/agents.yaml"));
    }
    if let Some(cfg) = dirs::config_dir() {
        paths.push(cfg.join("troupe/agents.yaml"));
    }

    // 3. Workspace-local
    paths.push(PathBuf::from(".troupe/agents.yaml"));
    paths.push(PathBuf::from("troupe.yaml"));

    paths
}

/// Load configuration by merging all discovered YAML files.
/// The `extra` argument may provide an explicit path (e.g. `--config` CLI
/// flag); an explicit path that does not exist is an error, while missing
/// search-path files are simply skipped.
pub fn load(extra: Option<&Path>) -> Result<Config, ConfigError> {
    let mut merged = serde_yaml::Value::Null;

    for path in config_search_paths() {
        if path.is_file() {
            debug!(path = %path.display(), "loading config layer");
            merge_yaml(&mut merged, read_layer(&path)?);
        }
    }

    if let Some(p) = extra {
        debug!(path = %p.display(), "loading explicit config");
        merge_yaml(&mut merged, read_layer(p)?);
    }

    finish(merged, "<merged config>")
}

/// Parse a single in-memory document.  `label` is used in error messages in
/// place of a file path.
pub fn from_str(source: &str, label: &str) -> Result<Config, ConfigError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| ConfigError::Parse {
            path: label.to_string(),
            message: e.to_string(),
        })?;
    finish(value, label)
}

fn read_layer(path: &Path) -> Result<serde_yaml::Value, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Deserialize the merged value into the typed schema.  Parsing already
/// succeeded at this point, so any failure here is a schema violation.
fn finish(value: serde_yaml::Value, label: &str) -> Result<Config, ConfigError> {
    if value.is_null() {
        // No config files anywhere: pure defaults (empty agent map).
        return Ok(Config::default());
    }
    serde_yaml::from_value(value).map_err(|e| ConfigError::Schema {
        path: label.to_string(),
        message: e.to_string(),
    })
}

/// Deep-merge `src` into `dst`; src wins on scalar conflicts.
fn merge_yaml(dst: &mut serde_yaml::Value, src: serde_yaml::Value) {
    match (dst, src) {
        (serde_yaml::Value::Mapping(d), serde_yaml::Value::Mapping(s)) => {
            for (k, v) in s {
                let entry = d.entry(k).or_insert(serde_yaml::Value::Null);
                merge_yaml(entry, v);
            }
        }
        (dst, src) => *dst = src,
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
