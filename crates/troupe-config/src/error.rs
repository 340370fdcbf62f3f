// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Load-time configuration failures.  All of these are fatal: a document
/// that cannot be read, parsed, or validated cannot seed a resolution
/// session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed YAML.
    #[error("parsing {path}: {message}")]
    Parse { path: String, message: String },

    /// The document is well-formed YAML but does not match the config
    /// schema (missing required fields, wrong types).
    #[error("invalid config {path}: {message}")]
    Schema { path: String, message: String },
}
