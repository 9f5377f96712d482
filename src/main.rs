//! Semgraph CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "semgraph")]
#[command(about = "Compile a semantic graph into ordered code-generation prompts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./semgraph.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one prompt file per source file into the output directory
    Compile {
        /// Semantic graph JSON
        #[arg(default_value = "full-graph.json")]
        graph: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Neighborhood distance bound
        #[arg(long)]
        max_dist: Option<u32>,
    },
    /// Print the build order of every partition without writing files
    Order {
        /// Semantic graph JSON
        #[arg(default_value = "full-graph.json")]
        graph: PathBuf,
    },
    /// Print the rendered neighborhood of one node
    Show {
        /// Node id to render
        node: String,

        /// Semantic graph JSON
        #[arg(short, long, default_value = "full-graph.json")]
        graph: PathBuf,

        /// Neighborhood distance bound
        #[arg(long)]
        max_dist: Option<u32>,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "semgraph={log_level},semgraph_core={log_level},semgraph_prompt={log_level}"
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Compile { graph, out, max_dist } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            if let Some(out) = out {
                config.output_dir = out;
            }
            if let Some(max_dist) = max_dist {
                config.max_dist = max_dist;
            }
            commands::compile(&graph, &config)
        }
        Commands::Order { graph } => commands::order(&graph),
        Commands::Show { node, graph, max_dist } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            if let Some(max_dist) = max_dist {
                config.max_dist = max_dist;
            }
            commands::show(&graph, &node, &config)
        }
        Commands::Version => {
            println!("Semgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
