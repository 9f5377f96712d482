//! Compiler configuration (`semgraph.toml`)

use std::path::{Path, PathBuf};

use semgraph_core::{DEFAULT_MAX_DIST, RenderOptions};
use serde::Deserialize;

use crate::error::{EmitError, Result};

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE: &str = "semgraph.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Neighborhood distance bound for "allowed external references".
    pub max_dist: u32,
    /// Directory receiving one `.txt` file per partition.
    pub output_dir: PathBuf,
    /// Language the generated code is requested in.
    pub target_language: String,
    /// Runtime assumptions stated in every prompt's instructions.
    pub runtime_context: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            max_dist: DEFAULT_MAX_DIST,
            output_dir: PathBuf::from("prompt-txt"),
            target_language: "javascript".to_string(),
            runtime_context: "node.js, express, mysql".to_string(),
        }
    }
}

impl CompilerConfig {
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| EmitError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a config file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(EmitError::io(path))?;
        let config = Self::from_toml(&text, path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `semgraph.toml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            max_dist: self.max_dist,
        }
    }
}
