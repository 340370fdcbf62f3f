// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
mod registry;
mod tool;

pub use registry::{DuplicateTool, ToolRegistry, ToolSchema};
pub use tool::{Tool, ToolCall, ToolOutput};
