//! Write ordered prompts to one text file per partition

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use semgraph_core::{Graph, NeighborhoodRenderer, OrderedPartition, order_partitions};

use crate::config::CompilerConfig;
use crate::error::{EmitError, Result};
use crate::prompt::{PROMPT_SEPARATOR, build_prompt, file_header, output_file_name};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Distinct prompt files written.
    pub files: usize,
    /// Prompt blocks written across all files.
    pub prompts: usize,
}

pub struct Emitter<'a> {
    graph: &'a Graph,
    config: &'a CompilerConfig,
    renderer: NeighborhoodRenderer<'a>,
}

impl<'a> Emitter<'a> {
    pub fn new(graph: &'a Graph, config: &'a CompilerConfig) -> Self {
        Emitter {
            graph,
            config,
            renderer: NeighborhoodRenderer::new(graph, config.render_options()),
        }
    }

    /// Concatenated prompt blocks of one ordered partition, without header.
    pub fn render_partition(&self, part: &OrderedPartition<'_>) -> String {
        let mut body = String::new();
        for node in &part.nodes {
            body.push_str(PROMPT_SEPARATOR);
            body.push_str(&build_prompt(node, &self.renderer, self.config));
        }
        body
    }

    /// Run the whole pipeline into `out_dir`.
    ///
    /// Every partition is ordered before anything touches the output
    /// directory, so a cycle leaves the previous run's files in place.
    pub fn compile(&self, out_dir: &Path) -> Result<CompileSummary> {
        let ordered = order_partitions(self.graph)?;
        prepare_output_dir(out_dir)?;

        let header = file_header(self.config);
        let mut written: HashSet<String> = HashSet::new();
        let mut summary = CompileSummary::default();

        for part in &ordered {
            let name = output_file_name(&part.key.filename);
            let path = out_dir.join(&name);
            let body = self.render_partition(part);

            if written.insert(name) {
                let mut contents = String::with_capacity(header.len() + body.len());
                contents.push_str(&header);
                contents.push_str(&body);
                fs::write(&path, contents).map_err(EmitError::io(&path))?;
            } else {
                tracing::warn!(
                    "Partition {} shares {} with an earlier partition; appending",
                    part.key,
                    path.display()
                );
                append(&path, &body)?;
            }

            summary.prompts += part.nodes.len();
            tracing::debug!("Wrote {} prompts for {} to {}", part.nodes.len(), part.key, path.display());
        }

        summary.files = written.len();
        tracing::info!(
            "Compiled {} prompt files and {} prompts into {}",
            summary.files,
            summary.prompts,
            out_dir.display()
        );
        Ok(summary)
    }
}

/// Create `dir` if needed and delete `.txt` files left by earlier runs.
/// Other files are left alone.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(EmitError::io(dir))?;

    let mut removed = 0usize;
    for entry in fs::read_dir(dir).map_err(EmitError::io(dir))? {
        let path = entry.map_err(EmitError::io(dir))?.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        if is_txt && path.is_file() {
            fs::remove_file(&path).map_err(EmitError::io(&path))?;
            removed += 1;
        }
    }

    if removed > 0 {
        tracing::debug!("Removed {} stale prompt files from {}", removed, dir.display());
    }
    Ok(())
}

fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(EmitError::io(path))?;
    file.write_all(text.as_bytes()).map_err(EmitError::io(path))
}
