//! Integration tests for Semgraph
//!
//! These tests drive the `semgraph` binary end to end on graphs written to
//! temporary directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const GRAPH: &str = r#"{
  "nodes": [
    { "id": "db.pool", "name": "pool", "type": "GlobalVariable", "filename": "./db.js", "placeType": "module", "description": "mysql connection pool" },
    { "id": "db.query", "name": "query", "type": "Function", "filename": "./db.js", "placeType": "module", "description": "Run one SQL statement" },
    { "id": "app.listUsers", "name": "listUsers", "type": "Function", "filename": "./app/index.js", "placeType": "module", "description": "GET /users\nresponds with JSON" },
    { "id": "app.server", "name": "server", "type": "GlobalVariable", "filename": "./app/index.js", "placeType": "module" }
  ],
  "edges": [
    { "from": { "id": "db.query" }, "to": { "id": "db.pool" }, "type": "uses" },
    { "from": { "id": "app.listUsers" }, "to": { "id": "db.query" }, "type": "imported" },
    { "from": { "id": "app.listUsers" }, "to": { "id": "app.server" }, "type": "uses" },
    { "from": { "id": "app.listUsers" }, "to": { "id": "missing" }, "type": "calls" }
  ]
}"#;

fn semgraph(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_semgraph"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute semgraph")
}

fn workspace(graph: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("full-graph.json"), graph).unwrap();
    temp_dir
}

fn read_outputs(dir: &Path) -> Vec<(String, String)> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .map(|p| {
            let name = p.file_name().unwrap().to_string_lossy().to_string();
            (name, fs::read_to_string(&p).unwrap())
        })
        .collect();
    files.sort();
    files
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let temp_dir = TempDir::new().unwrap();
    let output = semgraph(temp_dir.path(), &["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Compile a semantic graph into ordered code-generation prompts"));
}

#[test]
fn test_compile_end_to_end() {
    let temp_dir = workspace(GRAPH);
    let output = semgraph(temp_dir.path(), &["compile", "--out", "prompts"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Compiled 2 prompt files (.txt) with 4 independent prompts"));

    let files = read_outputs(&temp_dir.path().join("prompts"));
    let names: Vec<_> = files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["DOT__app__indexDOTjs.txt", "DOT__dbDOTjs.txt"]);

    let app = &files[0].1;
    let server = app.find("Component name: server").unwrap();
    let list_users = app.find("Component name: listUsers").unwrap();
    assert!(server < list_users);
    assert!(app.contains("  - query (Function) in ./db.js\n"));
    assert!(app.contains("    - uses pool (GlobalVariable) in ./db.js\n"));
    assert!(app.contains("GET /users\nresponds with JSON"));

    // The dangling reference is reported but does not stop the run.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing"));
}

#[test]
fn test_compile_is_idempotent() {
    let temp_dir = workspace(GRAPH);

    assert!(semgraph(temp_dir.path(), &["compile"]).status.success());
    let first = read_outputs(&temp_dir.path().join("prompt-txt"));
    assert!(semgraph(temp_dir.path(), &["compile"]).status.success());
    let second = read_outputs(&temp_dir.path().join("prompt-txt"));

    assert_eq!(first, second);
}

#[test]
fn test_stale_prompt_files_are_removed() {
    let temp_dir = workspace(GRAPH);
    let out = temp_dir.path().join("prompt-txt");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("oldDOTjs.txt"), "stale").unwrap();
    fs::write(out.join("notes.md"), "keep me").unwrap();

    assert!(semgraph(temp_dir.path(), &["compile"]).status.success());

    assert!(!out.join("oldDOTjs.txt").exists());
    assert!(out.join("notes.md").exists());
}

#[test]
fn test_cycle_aborts_run() {
    let temp_dir = workspace(
        r#"{
          "nodes": [
            { "id": "a", "name": "a", "type": "Function", "filename": "loop.js", "placeType": "module" },
            { "id": "b", "name": "b", "type": "Function", "filename": "loop.js", "placeType": "module" }
          ],
          "edges": [
            { "from": { "id": "a" }, "to": { "id": "b" }, "type": "calls" },
            { "from": { "id": "b" }, "to": { "id": "a" }, "type": "calls" }
          ]
        }"#,
    );
    let output = semgraph(temp_dir.path(), &["compile"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cycle detected in partition loop.js [module]"));
    assert!(stderr.contains("a, b"));
}

#[test]
fn test_malformed_graph_is_rejected() {
    let temp_dir = workspace(r#"{ "nodes": [] }"#);
    let output = semgraph(temp_dir.path(), &["compile"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed input"));
    assert!(!temp_dir.path().join("prompt-txt").exists());
}

#[test]
fn test_missing_graph_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = semgraph(temp_dir.path(), &["compile", "nowhere.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_config_file_is_honored() {
    let temp_dir = workspace(GRAPH);
    fs::write(
        temp_dir.path().join("semgraph.toml"),
        "output_dir = \"generated\"\nmax_dist = 0\nruntime_context = \"deno, postgres\"\n",
    )
    .unwrap();

    assert!(semgraph(temp_dir.path(), &["compile"]).status.success());

    let files = read_outputs(&temp_dir.path().join("generated"));
    let app = &files[0].1;
    assert!(app.contains("deno, postgres"));
    // With no distance budget only free edges are followed.
    assert!(app.contains("  - query (Function) in ./db.js\n"));
    assert!(!app.contains("uses pool"));
    assert!(!app.contains("  - server (GlobalVariable)"));
}

#[test]
fn test_order_command() {
    let temp_dir = workspace(GRAPH);
    let output = semgraph(temp_dir.path(), &["order"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = concat!(
        "./db.js [module]\n",
        "    1. pool (GlobalVariable) [db.pool]\n",
        "    2. query (Function) [db.query]\n",
        "./app/index.js [module]\n",
        "    1. server (GlobalVariable) [app.server]\n",
        "    2. listUsers (Function) [app.listUsers]\n",
    );
    assert_eq!(stdout, expected);
    assert!(!temp_dir.path().join("prompt-txt").exists());
}

#[test]
fn test_show_command() {
    let temp_dir = workspace(GRAPH);
    let output = semgraph(temp_dir.path(), &["show", "app.listUsers"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("listUsers (Function) in ./app/index.js\n"));
    assert!(stdout.contains("  - query (Function) in ./db.js\n"));

    let missing = semgraph(temp_dir.path(), &["show", "nope"]);
    assert!(!missing.status.success());

    fs::rename(temp_dir.path().join("full-graph.json"), temp_dir.path().join("other.json")).unwrap();
    let output = semgraph(temp_dir.path(), &["show", "db.query", "--graph", "other.json", "--max-dist", "0"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("query (Function) in ./db.js\n"));
    assert!(!stdout.contains("pool"));
}
