// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
//! [`GraphResolver`] — turns a root agent key into a fully wired
//! [`BuiltAgent`], resolving the tool/agent-reference graph exactly once
//! per key, detecting cycles, and reporting unresolved references without
//! aborting the build.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use troupe_tools::{Tool, ToolRegistry};

use crate::error::{ComposeError, UnresolvedRef};
use crate::store::SpecStore;

/// One resolved capability of an agent.
///
/// The two variants mirror the two namespaces a reference can resolve in:
/// the primitive tool registry, or the agent spec store (in which case the
/// referenced agent is built first and exposed as a callable sub-agent).
#[derive(Clone)]
pub enum Capability {
    Tool(Arc<dyn Tool>),
    Agent(Arc<BuiltAgent>),
}

impl Capability {
    /// Key the capability resolved under (tool name or sub-agent key).
    pub fn key(&self) -> &str {
        match self {
            Capability::Tool(t) => t.name(),
            Capability::Agent(a) => &a.key,
        }
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, Capability::Agent(_))
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Tool(t) => write!(f, "Tool({})", t.name()),
            Capability::Agent(a) => write!(f, "Agent({})", a.key),
        }
    }
}

/// A fully wired agent.  Owned by the resolver's cache; parents referencing
/// it as a sub-agent hold `Arc` clones, so a shared sub-agent is one
/// instance, not one per parent.
#[derive(Debug)]
pub struct BuiltAgent {
    /// Spec-store key this agent was built from.
    pub key: String,
    pub name: String,
    pub instruction: String,
    /// Resolved capabilities in declaration order.
    pub capabilities: Vec<Capability>,
    pub output_key: Option<String>,
}

/// Result of one successful build pass: the root agent plus any
/// unresolved-reference warnings collected along the way.
#[derive(Debug)]
pub struct Composition {
    pub root: Arc<BuiltAgent>,
    pub warnings: Vec<UnresolvedRef>,
}

/// Memoized depth-first resolver over a spec store and a tool registry.
///
/// One resolver instance is one resolution session: the build cache lives
/// inside it, so repeated `build` calls return the cached instances and
/// independent sessions simply use separate resolvers.  No global state.
pub struct GraphResolver {
    registry: Arc<ToolRegistry>,
    specs: SpecStore,
    cache: HashMap<String, Arc<BuiltAgent>>,
    strict: bool,
}

impl GraphResolver {
    pub fn new(registry: Arc<ToolRegistry>, specs: SpecStore) -> Self {
        Self {
            registry,
            specs,
            cache: HashMap::new(),
            strict: false,
        }
    }

    /// In strict mode an unresolved capability reference aborts the build
    /// instead of being collected as a warning.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve `root` and every transitive dependency into a wired agent
    /// graph.  Structural errors (unknown root, cycles) are fatal;
    /// unresolved capability references are collected as warnings unless
    /// strict mode is on.
    pub fn build(&mut self, root: &str) -> Result<Composition, ComposeError> {
        let mut visiting = Vec::new();
        let mut warnings = Vec::new();
        let root = self.build_inner(root, &mut visiting, &mut warnings)?;
        Ok(Composition { root, warnings })
    }

    fn build_inner(
        &mut self,
        key: &str,
        visiting: &mut Vec<String>,
        warnings: &mut Vec<UnresolvedRef>,
    ) -> Result<Arc<BuiltAgent>, ComposeError> {
        // Memoization: a key referenced by multiple parents is built once
        // and shared.  Checked before the cycle test so a diamond-shaped
        // graph is not mistaken for a cycle.
        if let Some(agent) = self.cache.get(key) {
            return Ok(agent.clone());
        }

        if let Some(pos) = visiting.iter().position(|k| k == key) {
            let mut path: Vec<String> = visiting[pos..].to_vec();
            path.push(key.to_string());
            return Err(ComposeError::CyclicReference { path });
        }

        let spec = self
            .specs
            .get(key)
            .ok_or_else(|| ComposeError::UnknownAgent(key.to_string()))?
            .clone();

        visiting.push(key.to_string());

        let mut capabilities = Vec::with_capacity(spec.tools.len());
        for reference in &spec.tools {
            if let Some(tool) = self.registry.get(reference) {
                capabilities.push(Capability::Tool(tool));
            } else if self.specs.contains(reference) {
                let sub = self.build_inner(reference, visiting, warnings)?;
                capabilities.push(Capability::Agent(sub));
            } else {
                let unresolved = UnresolvedRef {
                    agent: key.to_string(),
                    reference: reference.clone(),
                };
                if self.strict {
                    return Err(ComposeError::UnresolvedRef(unresolved));
                }
                warn!(agent = %key, reference = %reference,
                      "capability reference not found in registry or agent list");
                warnings.push(unresolved);
            }
        }

        visiting.pop();

        let agent = Arc::new(BuiltAgent {
            key: key.to_string(),
            name: spec.name,
            instruction: spec.instruction,
            capabilities,
            output_key: spec.output_key,
        });
        debug!(agent = %key, name = %agent.name, "built agent");
        self.cache.insert(key.to_string(), agent.clone());
        Ok(agent)
    }

    /// Already-built agent for `key`, if this session has resolved it.
    pub fn cached(&self, key: &str) -> Option<Arc<BuiltAgent>> {
        self.cache.get(key).cloned()
    }

    /// Number of distinct agents built so far in this session.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Discard every built agent.  Used when the underlying configuration
    /// changes and the graph must be rebuilt from scratch.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use troupe_config::AgentSpec;
    use troupe_tools::{ToolCall, ToolOutput};

    use super::*;

    struct FakeTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for FakeTool {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "test tool"
        }
        fn parameters_schema(&self) -> Value {
            json!({ "type": "object" })
        }
        async fn execute(&self, call: &ToolCall) -> ToolOutput {
            ToolOutput::ok(&call.id, "ok")
        }
    }

    fn registry(tools: &[&'static str]) -> Arc<ToolRegistry> {
        let mut reg = ToolRegistry::new();
        for t in tools {
            reg.register(FakeTool { name: t }).unwrap();
        }
        Arc::new(reg)
    }

    fn store(agents: &[(&str, &[&str])]) -> SpecStore {
        let mut config = troupe_config::Config::default();
        for (key, refs) in agents {
            config.agents.insert(
                key.to_string(),
                AgentSpec {
                    name: format!("{key}_name"),
                    instruction: format!("instruction for {key}"),
                    tools: refs.iter().map(|r| r.to_string()).collect(),
                    output_key: None,
                },
            );
        }
        SpecStore::from_config(&config)
    }

    #[test]
    fn leaf_agent_builds_with_no_capabilities() {
        let mut resolver = GraphResolver::new(registry(&[]), store(&[("solo", &[])]));
        let built = resolver.build("solo").unwrap();
        assert_eq!(built.root.key, "solo");
        assert_eq!(built.root.name, "solo_name");
        assert!(built.root.capabilities.is_empty());
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn mixed_tool_and_subagent_scenario() {
        // root: tools=[search, summarizer]; registry has search;
        // summarizer is an agent with no tools.
        let mut resolver = GraphResolver::new(
            registry(&["search"]),
            store(&[("root", &["search", "summarizer"]), ("summarizer", &[])]),
        );
        let built = resolver.build("root").unwrap();
        assert_eq!(built.root.capabilities.len(), 2);
        assert!(built.warnings.is_empty());
        assert!(!built.root.capabilities[0].is_agent());
        assert!(built.root.capabilities[1].is_agent());
        assert_eq!(built.root.capabilities[1].key(), "summarizer");
    }

    #[test]
    fn capability_order_matches_declaration_order() {
        let mut resolver = GraphResolver::new(
            registry(&["alpha", "zeta"]),
            store(&[("root", &["zeta", "mid", "alpha"]), ("mid", &[])]),
        );
        let built = resolver.build("root").unwrap();
        let keys: Vec<&str> = built.root.capabilities.iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["zeta", "mid", "alpha"]);
    }

    #[test]
    fn unresolved_reference_warns_and_omits() {
        let mut resolver = GraphResolver::new(registry(&[]), store(&[("root", &["ghost"])]));
        let built = resolver.build("root").unwrap();
        assert!(built.root.capabilities.is_empty());
        assert_eq!(built.warnings.len(), 1);
        assert_eq!(built.warnings[0].agent, "root");
        assert_eq!(built.warnings[0].reference, "ghost");
    }

    #[test]
    fn strict_mode_fails_on_unresolved_reference() {
        let mut resolver =
            GraphResolver::new(registry(&[]), store(&[("root", &["ghost"])])).strict(true);
        let err = resolver.build("root").unwrap_err();
        assert!(matches!(err, ComposeError::UnresolvedRef(_)));
    }

    #[test]
    fn unknown_root_is_fatal() {
        let mut resolver = GraphResolver::new(registry(&[]), store(&[]));
        let err = resolver.build("missing").unwrap_err();
        assert!(matches!(err, ComposeError::UnknownAgent(k) if k == "missing"));
    }

    #[test]
    fn two_node_cycle_is_rejected() {
        let mut resolver =
            GraphResolver::new(registry(&[]), store(&[("a", &["b"]), ("b", &["a"])]));
        let err = resolver.build("a").unwrap_err();
        match err {
            ComposeError::CyclicReference { path } => {
                assert_eq!(path, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
        // A failed build must not leave partial agents behind.
        assert_eq!(resolver.cache_len(), 0);
    }

    #[test]
    fn self_reference_is_rejected() {
        let mut resolver = GraphResolver::new(registry(&[]), store(&[("a", &["a"])]));
        let err = resolver.build("a").unwrap_err();
        assert!(matches!(err, ComposeError::CyclicReference { .. }));
    }

    #[test]
    fn shared_subagent_is_built_once() {
        // Diamond: root -> left -> shared, root -> right -> shared.
        let mut resolver = GraphResolver::new(
            registry(&[]),
            store(&[
                ("root", &["left", "right"]),
                ("left", &["shared"]),
                ("right", &["shared"]),
                ("shared", &[]),
            ]),
        );
        let built = resolver.build("root").unwrap();
        assert_eq!(resolver.cache_len(), 4);

        let sub = |c: &Capability| match c {
            Capability::Agent(a) => a.clone(),
            Capability::Tool(_) => panic!("expected agent capability"),
        };
        let left = sub(&built.root.capabilities[0]);
        let right = sub(&built.root.capabilities[1]);
        let via_left = sub(&left.capabilities[0]);
        let via_right = sub(&right.capabilities[0]);
        assert!(Arc::ptr_eq(&via_left, &via_right), "shared sub-agent duplicated");
    }

    #[test]
    fn rebuilding_returns_cached_instances() {
        let mut resolver = GraphResolver::new(
            registry(&[]),
            store(&[("root", &["sub"]), ("sub", &[])]),
        );
        let first = resolver.build("root").unwrap();
        let second = resolver.build("root").unwrap();
        assert!(Arc::ptr_eq(&first.root, &second.root));
        assert!(Arc::ptr_eq(
            &resolver.cached("sub").unwrap(),
            &resolver.cached("sub").unwrap()
        ));
        // Cached hits contribute no fresh warnings.
        assert!(second.warnings.is_empty());
    }

    #[test]
    fn clear_cache_forces_fresh_build() {
        let mut resolver = GraphResolver::new(registry(&[]), store(&[("root", &[])]));
        let first = resolver.build("root").unwrap();
        resolver.clear_cache();
        assert_eq!(resolver.cache_len(), 0);
        let second = resolver.build("root").unwrap();
        assert!(!Arc::ptr_eq(&first.root, &second.root));
    }

    #[test]
    fn registry_wins_when_key_is_both_tool_and_agent() {
        // A key present in both namespaces binds as a primitive tool; the
        // registry is consulted first.
        let mut resolver = GraphResolver::new(
            registry(&["dual"]),
            store(&[("root", &["dual"]), ("dual", &[])]),
        );
        let built = resolver.build("root").unwrap();
        assert!(!built.root.capabilities[0].is_agent());
    }
}
