// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level configuration document.
///
/// Two sections: `settings` (shared model/retry parameters applied to every
/// agent in the graph) and `agents` (the declarative agent specs the resolver
/// walks).  The whole document is immutable once loaded; reconfiguration
/// means loading a fresh `Config` and starting a new resolution session.
///
/// ```yaml
/// settings:
///   model_name: gemini-2.0-flash
///   retry:
///     attempts: 3
///     exp_base: 2.0
///     initial_delay: 1.0
///     http_status_codes: [429, 503]
/// agents:
///   root_agent:
///     name: research_coordinator
///     instruction: |
///       Delegate research to your sub-agents, then combine their output.
///     tools: [researcher, summarizer]
///   researcher:
///     name: web_researcher
///     instruction: Search the web and report findings.
///     tools: [google_search]
///   summarizer:
///     name: summarizer
///     instruction: Condense the research into three bullet points.
///     output_key: summary
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    /// Agent key → spec.  Keys are referenced from other agents' `tools`
    /// lists; a reference that matches an agent key is wired as a sub-agent.
    #[serde(default)]
    pub agents: HashMap<String, AgentSpec>,
}

/// Shared runtime settings forwarded to whatever host executes the graph.
/// The resolver itself never reads these; they ride along so one document
/// describes the whole deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Model name handed to the runtime host for every agent in the graph.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            retry: RetryConfig::default(),
        }
    }
}

fn default_model_name() -> String {
    "gemini-2.0-flash".into()
}

fn default_attempts() -> u32 {
    3
}
fn default_exp_base() -> f64 {
    2.0
}
fn default_initial_delay() -> f64 {
    1.0
}
fn default_http_status_codes() -> Vec<u16> {
    vec![429, 503]
}

/// Exponential-backoff retry parameters for model calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per model call.
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Base of the exponential backoff curve.
    #[serde(default = "default_exp_base")]
    pub exp_base: f64,
    /// Delay before the first retry, in seconds.
    #[serde(default = "default_initial_delay")]
    pub initial_delay: f64,
    /// HTTP status codes considered retryable.
    #[serde(default = "default_http_status_codes")]
    pub http_status_codes: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            exp_base: default_exp_base(),
            initial_delay: default_initial_delay(),
            http_status_codes: default_http_status_codes(),
        }
    }
}

/// One declared agent.  `name` and `instruction` are required; a document
/// omitting either fails schema validation at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Display name forwarded to the runtime host.
    pub name: String,
    /// System instruction for the agent.
    pub instruction: String,
    /// Ordered capability references.  Each entry is either a primitive
    /// tool key (registry lookup) or another agent key (wired as a
    /// sub-agent).  Order is preserved through resolution because it
    /// determines tool-choice priority downstream.
    #[serde(default)]
    pub tools: Vec<String>,
    /// Optional key under which the host stores this agent's output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
