use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn renders_file_input() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.torrent");
    write_file(&input, b"d4:name5:alice3:agei37ee");

    cargo_bin_cmd!("bdecode")
        .arg(&input)
        .assert()
        .success()
        .stdout("{ 'name': 'alice', 'age': 37 }\n");
}

#[test]
fn reads_stdin() {
    cargo_bin_cmd!("bdecode")
        .write_stdin("li1e3:fooe")
        .assert()
        .success()
        .stdout("[ 1, 'foo' ]\n");
}

#[test]
fn reads_stdin_from_dash() {
    cargo_bin_cmd!("bdecode")
        .arg("-")
        .write_stdin("i-42e")
        .assert()
        .success()
        .stdout("-42\n");
}

#[test]
fn json_output() {
    cargo_bin_cmd!("bdecode")
        .args(["--json", "--single-line"])
        .write_stdin("d1:ai1e1:bl1:x1:yee")
        .assert()
        .success()
        .stdout("{\"a\":1,\"b\":[\"x\",\"y\"]}\n");
}

#[test]
fn soft_error_is_a_warning() {
    cargo_bin_cmd!("bdecode")
        .write_stdin("d1:bi1e1:ai2ee")
        .assert()
        .success()
        .stdout("{ 'b': 1, 'a': 2 }\n")
        .stderr(contains("WARN").and(contains("unsorted dictionary key at offset 7")));
}

#[test]
fn hard_error_prints_partial_tree_and_fails() {
    cargo_bin_cmd!("bdecode")
        .write_stdin("li1ei2")
        .assert()
        .failure()
        .code(1)
        .stdout("[ 1 ]\n")
        .stderr(contains("ERROR").and(contains("unexpected end of file in bencoded string at offset 6")));
}

#[test]
fn depth_limit_flag() {
    cargo_bin_cmd!("bdecode")
        .args(["--depth-limit", "2"])
        .write_stdin("llllee")
        .assert()
        .failure()
        .stderr(contains("bencoded nesting depth exceeded"));
}

#[test]
fn token_limit_flag() {
    cargo_bin_cmd!("bdecode")
        .args(["--token-limit", "3"])
        .write_stdin("li1ei2ei3ee")
        .assert()
        .failure()
        .stderr(contains("bencoded item count limit exceeded"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("missing.torrent");

    cargo_bin_cmd!("bdecode")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(contains("ERROR"));
}
