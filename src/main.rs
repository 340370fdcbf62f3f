mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use troupe_compose::{BuiltAgent, Capability, Composition, GraphResolver, SpecStore};
use troupe_tools::{Tool, ToolCall, ToolOutput, ToolRegistry};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = troupe_config::load(cli.config.as_deref())?;
    tracing::debug!(agents = config.agents.len(), "configuration loaded");
    let specs = SpecStore::from_config(&config);

    match cli.command {
        Commands::Check { root, tools, strict } => {
            let registry = declared_registry(&tools)?;
            let mut resolver = GraphResolver::new(Arc::new(registry), specs).strict(strict);
            let built = resolver.build(&root)?;
            print_check_report(&config, &resolver, &built);
        }
        Commands::Tree { root, tools } => {
            let registry = declared_registry(&tools)?;
            let mut resolver = GraphResolver::new(Arc::new(registry), specs);
            let built = resolver.build(&root)?;
            println!("{} ({})", built.root.key, built.root.name);
            print_tree(&built.root, 1);
            for warning in &built.warnings {
                println!("  ! {warning}");
            }
        }
        Commands::Agents => {
            print_agents(&specs);
        }
        Commands::ShowConfig => {
            println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
        }
    }

    Ok(())
}

/// A tool declared on the command line but not implemented here.
///
/// The registry is normally pre-populated by the host application with real
/// capabilities; for graph validation only the keys matter, so the CLI
/// registers a placeholder per `--tool` declaration.
struct DeclaredTool {
    name: String,
}

#[async_trait::async_trait]
impl Tool for DeclaredTool {
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        "declared by the host for graph validation"
    }
    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object" })
    }
    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        ToolOutput::err(
            &call.id,
            format!("tool '{}' is a validation placeholder", self.name),
        )
    }
}

fn declared_registry(tools: &[String]) -> anyhow::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    for name in tools {
        registry.register(DeclaredTool { name: name.clone() })?;
    }
    Ok(registry)
}

fn print_check_report(
    config: &troupe_config::Config,
    resolver: &GraphResolver,
    built: &Composition,
) {
    let retry = &config.settings.retry;
    println!(
        "Model: {} (retry: {} attempts, exp base {}, initial delay {}s)",
        config.settings.model_name, retry.attempts, retry.exp_base, retry.initial_delay
    );
    println!("Agents built: {}", resolver.cache_len());
    print_agent_summary(&built.root, &mut Vec::new());

    if built.warnings.is_empty() {
        println!("\nGraph is fully resolved.");
    } else {
        println!("\nWarnings: {}", built.warnings.len());
        for warning in &built.warnings {
            println!("  {warning}");
        }
    }
}

/// One summary line per distinct agent, root first, each printed once.
fn print_agent_summary(agent: &Arc<BuiltAgent>, seen: &mut Vec<String>) {
    if seen.iter().any(|k| *k == agent.key) {
        return;
    }
    seen.push(agent.key.clone());
    let tools = agent.capabilities.iter().filter(|c| !c.is_agent()).count();
    let subs = agent.capabilities.len() - tools;
    println!(
        "  {} ({}): {} tools, {} sub-agents",
        agent.key, agent.name, tools, subs
    );
    for cap in &agent.capabilities {
        if let Capability::Agent(sub) = cap {
            print_agent_summary(sub, seen);
        }
    }
}

fn print_tree(agent: &Arc<BuiltAgent>, depth: usize) {
    let indent = "  ".repeat(depth);
    for cap in &agent.capabilities {
        match cap {
            Capability::Tool(tool) => println!("{indent}{} [tool]", tool.name()),
            Capability::Agent(sub) => {
                println!("{indent}{} ({}) [agent]", sub.key, sub.name);
                print_tree(sub, depth + 1);
            }
        }
    }
}

fn print_agents(specs: &SpecStore) {
    if specs.is_empty() {
        println!("No agents declared.");
        return;
    }
    for key in specs.keys() {
        // keys() only returns declared keys, so the lookup cannot miss.
        let Some(spec) = specs.get(&key) else { continue };
        let first_line = spec.instruction.lines().next().unwrap_or("");
        let preview: String = first_line.chars().take(60).collect();
        let ellipsis = if first_line.chars().count() > 60 { "…" } else { "" };
        println!("{key} ({}): {preview}{ellipsis}", spec.name);
        if !spec.tools.is_empty() {
            println!("  tools: {}", spec.tools.join(", "));
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
