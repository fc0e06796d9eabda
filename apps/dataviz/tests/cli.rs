//! End-to-end tests for the `dataviz` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dataviz() -> Command {
    Command::cargo_bin("dataviz").unwrap()
}

#[test]
fn help_lists_build_command() {
    dataviz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"));
}

#[test]
fn builds_avl_tree_as_ascii() {
    dataviz()
        .args(["build", "--structure", "avl"])
        .args(["--put", "1", "--put", "2", "--put", "3"])
        .assert()
        .success()
        .stdout("AVLTree\n│   ┌── 3\n└── 2\n    └── 1\n");
}

#[test]
fn default_structure_is_avl() {
    dataviz()
        .args(["build", "--put", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("AVLTree\n"));
}

#[test]
fn edge_list_output() {
    dataviz()
        .args(["build", "--structure", "red-black", "--format", "edges"])
        .args(["--put", "1=a", "--put", "2=b", "--put", "3=c"])
        .assert()
        .success()
        .stdout("0 [1->a]\n1 [2->b]\n2 [3->c]\n1 -> 0\n1 -> 2\n");
}

#[test]
fn tree_map_json_with_removals() {
    dataviz()
        .args(["build", "--structure", "tree-map", "--format", "json"])
        .args(["--put", "2=b", "--put", "1=a", "--put", "-4=minus"])
        .args(["--remove", "2"])
        .assert()
        .success()
        .stdout("{\"-4\":\"minus\",\"1\":\"a\"}\n");
}

#[test]
fn heap_json_keeps_array_layout() {
    dataviz()
        .args(["build", "--structure", "heap", "--format", "json"])
        .args(["--put", "5", "--put", "1", "--put", "3"])
        .assert()
        .success()
        .stdout("[1,5,3]\n");
}

#[test]
fn dot_output_is_a_digraph() {
    dataviz()
        .args(["build", "--format", "dot", "--put", "7=x"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph graphname {"))
        .stdout(predicate::str::contains("label=\"7->x\""));
}

#[test]
fn missing_key_removal_warns_on_stderr() {
    dataviz()
        .args(["--log-level", "warn", "build", "--put", "1", "--remove", "9"])
        .assert()
        .success()
        .stderr(predicate::str::contains("key 9 not present"))
        .stderr(predicate::str::contains("building").not());
}

#[test]
fn loads_tree_from_json_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tree.json");
    std::fs::write(&input, r#"{"3": "c", "1": "a", "2": "b"}"#).unwrap();

    let assert = dataviz()
        .args(["build", "--structure", "red-black", "--format", "json", "--put", "4=d"])
        .arg("--from-json")
        .arg(&input)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"1": "a", "2": "b", "3": "c", "4": "d"})
    );
}

#[test]
fn malformed_json_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tree.json");
    std::fs::write(&input, "[1, 2]").unwrap();

    dataviz()
        .args(["build", "--structure", "avl", "--from-json"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn rejects_unknown_structure_and_bad_keys() {
    dataviz()
        .args(["build", "--structure", "splay"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown structure"));

    dataviz()
        .args(["build", "--put", "abc=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key"));
}

#[test]
fn config_file_sets_structure_and_log_format() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dataviz.yaml");
    std::fs::write(
        &config,
        "default_structure: heap\nlogging:\n  level: debug\n  format: compact\n",
    )
    .unwrap();

    dataviz()
        .arg("--config")
        .arg(&config)
        .args(["build", "--put", "2", "--put", "1"])
        .assert()
        .success()
        .stdout("BinaryHeap\n1, 2\n")
        .stderr(predicate::str::contains("D build: inserted 1"));
}

#[test]
fn image_rendering_reports_missing_graphviz() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dataviz.json");
    let settings = serde_json::json!({
        "output_dir": dir.path(),
        "render": {"binary": "no-such-graphviz-binary", "format": "svg"},
    });
    std::fs::write(&config, settings.to_string()).unwrap();

    dataviz()
        .arg("--config")
        .arg(&config)
        .args(["build", "--put", "1", "--image", "tree.svg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to render"))
        .stderr(predicate::str::contains("tree.svg"));
}
