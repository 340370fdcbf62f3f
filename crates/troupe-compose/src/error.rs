// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// A declared capability reference that matched neither the tool registry
/// nor the agent spec store.  Non-fatal by default: the build continues
/// with the reference omitted and the warning surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    /// Key of the agent that declared the reference.
    pub agent: String,
    /// The reference that resolved to nothing.
    pub reference: String,
}

impl std::fmt::Display for UnresolvedRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "agent '{}' references '{}' which is neither a registered tool nor an agent",
            self.agent, self.reference
        )
    }
}

/// Fatal resolution failures.  A structurally broken graph cannot produce
/// a usable root agent, so these abort the whole build.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// An agent transitively references itself.  `path` is the reference
    /// chain from the first repeated key back to itself.
    #[error("cyclic agent reference: {}", path.join(" -> "))]
    CyclicReference { path: Vec<String> },

    /// Strict mode only: an unresolved reference promoted to a fatal error.
    #[error("{0}")]
    UnresolvedRef(UnresolvedRef),
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
