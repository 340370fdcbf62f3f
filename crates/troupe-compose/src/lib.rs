// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
//! Declarative agent composition.
//!
//! A configuration document declares agents by key; each agent lists
//! capability references that are either primitive tools (looked up in a
//! [`ToolRegistry`](troupe_tools::ToolRegistry)) or other agents (wired in
//! as callable sub-agents).  [`GraphResolver`] turns a root key into one
//! fully wired [`BuiltAgent`], instantiating every transitive dependency
//! exactly once and rejecting cyclic graphs.

mod error;
mod host;
mod resolver;
mod store;

pub use error::{ComposeError, UnresolvedRef};
pub use host::RuntimeHost;
pub use resolver::{BuiltAgent, Capability, Composition, GraphResolver};
pub use store::SpecStore;
