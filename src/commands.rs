//! CLI command implementations

use anyhow::{Context, bail};
use semgraph_core::{Graph, NodeId, NeighborhoodRenderer, order_partitions};
use semgraph_prompt::{CompilerConfig, Emitter};
use std::path::Path;

/// Explicit `--config` must exist; otherwise pick up `./semgraph.toml` if any.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<CompilerConfig> {
    let config = match path {
        Some(path) => CompilerConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            CompilerConfig::discover(&cwd)?
        }
    };
    Ok(config)
}

/// Load a graph file, reporting edges that point at unknown nodes.
fn load_graph(path: &Path) -> anyhow::Result<Graph> {
    if !path.is_file() {
        bail!("semantic graph file does not exist: {}", path.display());
    }
    let graph = Graph::load(path).with_context(|| format!("cannot load {}", path.display()))?;

    for edge in graph.dangling_edges() {
        tracing::warn!(
            "Edge {} -[{}]-> {} references an unknown node; it will not be expanded",
            edge.source(),
            edge.kind,
            edge.target()
        );
    }
    tracing::info!("Loaded {} nodes, {} edges", graph.node_count(), graph.edge_count());
    Ok(graph)
}

pub fn compile(graph_path: &Path, config: &CompilerConfig) -> anyhow::Result<()> {
    tracing::info!("Using semantic graph: {}", graph_path.display());
    tracing::info!("Output directory: {}", config.output_dir.display());

    let graph = load_graph(graph_path)?;
    let summary = Emitter::new(&graph, config)
        .compile(&config.output_dir)
        .with_context(|| format!("failed to compile {}", graph_path.display()))?;

    println!(
        "Compiled {} prompt files (.txt) with {} independent prompts into {}",
        summary.files,
        summary.prompts,
        config.output_dir.display()
    );
    println!(
        "Feed the prompts to your language model one at a time, in order, and paste each \
         result back into the matching source file."
    );
    Ok(())
}

pub fn order(graph_path: &Path) -> anyhow::Result<()> {
    let graph = load_graph(graph_path)?;
    let ordered = order_partitions(&graph)?;

    for part in &ordered {
        println!("{}", part.key);
        for (pos, node) in part.nodes.iter().enumerate() {
            println!("  {:>3}. {} ({}) [{}]", pos + 1, node.name, node.node_type, node.id);
        }
    }
    Ok(())
}

pub fn show(graph_path: &Path, node: &str, config: &CompilerConfig) -> anyhow::Result<()> {
    let graph = load_graph(graph_path)?;
    let id = NodeId::new(node);
    let Some(root) = graph.node(&id) else {
        bail!("node `{}` is not in {}", node, graph_path.display());
    };

    println!("{} ({}) in {}", root.name, root.node_type, root.filename);
    print!("{}", NeighborhoodRenderer::new(&graph, config.render_options()).render(&id));
    Ok(())
}
