//! Errors raised while emitting prompt files

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmitError>;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Graph(#[from] semgraph_core::Error),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl EmitError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| EmitError::Io { path, source }
    }
}
