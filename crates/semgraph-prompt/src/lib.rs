//! Prompt rendering and emission for Semgraph
//!
//! Turns ordered partitions into prompt files: one file per source file,
//! one `<START>`/`<END>` block per node, in build order.

pub mod config;
pub mod emitter;
pub mod error;
pub mod prompt;


pub use config::{CONFIG_FILE, CompilerConfig};
pub use emitter::{CompileSummary, Emitter, prepare_output_dir};
pub use error::{EmitError, Result};
pub use prompt::{END_MARKER, START_MARKER, build_prompt, file_header, output_file_name};
