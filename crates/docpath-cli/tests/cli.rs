use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TREE: &str = r#"[
    {
        "text": "A",
        "tags": {"keep": true},
        "chunks": [
            {"text": "B", "chunks": [{"text": "D"}]},
            {"text": "C", "tags": {"keep": true}}
        ],
        "matches": [
            {"text": "M1"}, {"text": "M2"}, {"text": "M3"}
        ]
    },
    {"text": "E"}
]"#;

struct Fixture {
    dir: TempDir,
    docs: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs.json");
        std::fs::write(&docs, TREE).unwrap();
        Self { dir, docs }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("docpath").unwrap();
        cmd.env("DOCPATH_CONFIG", self.config());
        cmd.env_remove("RUST_LOG");
        cmd
    }
}

fn json_stdout(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn texts(docs: &Value) -> Vec<String> {
    docs.as_array()
        .unwrap()
        .iter()
        .map(|d| d["text"].as_str().unwrap().to_string())
        .collect()
}

fn docs_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn traverse_defaults_to_root() {
    let fx = Fixture::new();
    let out = json_stdout(fx.cmd().args(["traverse", docs_arg(&fx.docs), "-f", "json"]));
    assert_eq!(texts(&out), vec!["A", "E"]);
}

#[test]
fn traverse_merges_paths() {
    let fx = Fixture::new();
    let out = json_stdout(fx.cmd().args([
        "traverse",
        docs_arg(&fx.docs),
        "-p",
        "c,cc",
        "-f",
        "json",
    ]));
    assert_eq!(texts(&out), vec!["B", "C", "D"]);
}

#[test]
fn traverse_per_path() {
    let fx = Fixture::new();
    let out = json_stdout(fx.cmd().args([
        "traverse",
        docs_arg(&fx.docs),
        "-p",
        "c,m",
        "--per-path",
        "-f",
        "json",
    ]));

    let sections = out.as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["label"], "c");
    assert_eq!(texts(&sections[0]["docs"]), vec!["B", "C"]);
    assert_eq!(texts(&sections[1]["docs"]), vec!["M1", "M2", "M3"]);
}

#[test]
fn traverse_with_filter() {
    let fx = Fixture::new();
    let out = json_stdout(fx.cmd().args([
        "traverse",
        docs_arg(&fx.docs),
        "-p",
        "r,c",
        "--where",
        "keep",
        "-f",
        "json",
    ]));
    assert_eq!(texts(&out), vec!["A", "C"]);
}

#[test]
fn traverse_rejects_invalid_symbol() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["traverse", docs_arg(&fx.docs), "-p", "cx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("`x`"));
}

#[test]
fn traverse_table_output() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["traverse", docs_arg(&fx.docs), "-p", "m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("M2").and(predicate::str::contains("(3 docs)")));
}

#[test]
fn batch_splits_in_order() {
    let fx = Fixture::new();
    let out = json_stdout(fx.cmd().args([
        "batch",
        docs_arg(&fx.docs),
        "-p",
        "r,c,cc,m",
        "-s",
        "3",
        "-f",
        "json",
    ]));

    let batches = out.as_array().unwrap();
    let sizes: Vec<usize> = batches
        .iter()
        .map(|b| b["docs"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![3, 3, 2]);
    assert_eq!(texts(&batches[0]["docs"]), vec!["A", "E", "B"]);
}

#[test]
fn batch_shuffle_with_seed_is_reproducible() {
    let fx = Fixture::new();
    let run = || {
        json_stdout(fx.cmd().args([
            "batch",
            docs_arg(&fx.docs),
            "-p",
            "r,c,m",
            "-s",
            "2",
            "--shuffle",
            "--seed",
            "11",
            "-f",
            "json",
        ]))
    };
    assert_eq!(run(), run());
}

#[test]
fn batch_rejects_non_positive_size() {
    let fx = Fixture::new();
    for size in ["0", "-1"] {
        fx.cmd()
            .args(["batch", docs_arg(&fx.docs), "-s", size])
            .assert()
            .failure()
            .stderr(predicate::str::contains("positive integer"));
    }
}

#[test]
fn config_values_apply_to_commands() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "set", "default_paths", "m"])
        .assert()
        .success();
    fx.cmd()
        .args(["config", "set", "format", "json"])
        .assert()
        .success();

    let out = json_stdout(fx.cmd().args(["traverse", docs_arg(&fx.docs)]));
    assert_eq!(texts(&out), vec!["M1", "M2", "M3"]);

    fx.cmd()
        .args(["config", "get", "default_paths"])
        .assert()
        .success()
        .stdout("m\n");
}

#[test]
fn config_init_refuses_overwrite() {
    let fx = Fixture::new();
    fx.cmd().args(["config", "init"]).assert().success();
    fx.cmd().args(["config", "init"]).assert().failure();
    fx.cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_rejects_unknown_key() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "get", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn completions_for_bash() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docpath"));
}
