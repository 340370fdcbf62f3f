// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
use std::sync::Arc;

use async_trait::async_trait;

use crate::resolver::BuiltAgent;

/// Execution seam between a built agent graph and whatever actually runs
/// it (model invocation, retries, tool dispatch).  The resolver never calls
/// this; it hands the graph over and steps aside.
#[async_trait]
pub trait RuntimeHost: Send + Sync {
    /// Run `agent` against `input` and return its text response.
    async fn run(&self, agent: Arc<BuiltAgent>, input: &str) -> anyhow::Result<String>;
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
