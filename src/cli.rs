// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "troupe",
    about = "Resolve and inspect declarative agent-composition graphs",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the agent graph and report warnings without running anything
    Check {
        /// Root agent key to resolve
        #[arg(long, default_value = "root_agent")]
        root: String,

        /// Declare a primitive tool the host will provide.
        /// May be repeated: --tool google_search --tool read_website
        #[arg(long = "tool", value_name = "NAME")]
        tools: Vec<String>,

        /// Treat unresolved capability references as fatal
        #[arg(long)]
        strict: bool,
    },

    /// Print the resolved capability tree for an agent
    Tree {
        /// Root agent key to resolve
        #[arg(long, default_value = "root_agent")]
        root: String,

        /// Declare a primitive tool the host will provide (repeatable)
        #[arg(long = "tool", value_name = "NAME")]
        tools: Vec<String>,
    },

    /// List the agents declared in the configuration
    Agents,

    /// Print the effective merged configuration as YAML
    ShowConfig,
}
