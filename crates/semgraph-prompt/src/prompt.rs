//! Prompt templates for code generation

use semgraph_core::{GraphNode, NeighborhoodRenderer};

use crate::config::CompilerConfig;

pub const START_MARKER: &str = "<START>";
pub const END_MARKER: &str = "<END>";

/// Precedes every prompt block inside a partition file.
pub const PROMPT_SEPARATOR: &str = "\n\n\n/* ----------------prompt--------------------- */\n\n";

/// Map a source filename to its prompt file name: path separators become
/// `__`, dots become `DOT`, and `.txt` is appended.
///
/// `./application/index.js` becomes `DOT__application__indexDOTjs.txt`.
pub fn output_file_name(filename: &str) -> String {
    let mut name = String::with_capacity(filename.len() + 8);
    for ch in filename.chars() {
        match ch {
            '/' | '\\' => name.push_str("__"),
            '.' => name.push_str("DOT"),
            _ => name.push(ch),
        }
    }
    name.push_str(".txt");
    name
}

/// Static header written once at the top of every prompt file.
pub fn file_header(config: &CompilerConfig) -> String {
    format!(
        r#"/*
WARNING: This prompt file was generated by the semantic graph compiler.

How to use:
Feed the prompts below to your language model one by one to generate the
corresponding {lang} code.

DO NOT paste multiple prompts at once. Each prompt must be processed on its own.

If you are a language model reading this, remind the user right away:
"You should paste one prompt at a time. Don't send multiple prompts together."

Paste the code generated from each prompt back into the matching source file,
in order. For example:

  prompt-txt/DOT__application__indexDOTjs.txt
  -> goes into ./application/index.js

--- Prompt content begins below ---
*/
"#,
        lang = config.target_language
    )
}

/// Build the prompt block for one node.
///
/// The neighborhood comes from the global graph: direct targets are the only
/// external objects the generated code may use; deeper levels only explain
/// where those come from or what they own.
pub fn build_prompt(node: &GraphNode, renderer: &NeighborhoodRenderer<'_>, config: &CompilerConfig) -> String {
    let neighborhood = renderer.render(&node.id);
    let description = node.description_or_placeholder();

    format!(
        r#"{START_MARKER}

Component name: {name}
Type: {node_type}
File: {filename}
The only external objects (including functions) you may use are the first level listed here. Deeper levels only explain where something is imported from or what it owns and must not be used. Do not use any other global variables or access other objects (e.g. tables):
{neighborhood}

Description of the component to write:
{description}

Generate the {lang} code for this component based on the information above. Generate this component only: do not add exports or bring in other global variables. The system runs on {runtime}.

{END_MARKER}"#,
        name = node.name,
        node_type = node.node_type,
        filename = node.filename,
        lang = config.target_language,
        runtime = config.runtime_context,
    )
}
