//! End-to-end tests of the `omitparens` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn omitparens() -> Command {
    Command::cargo_bin("omitparens").unwrap()
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, text) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }
    dir
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

#[test]
fn test_help() {
    omitparens()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--fix"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_clean_project_exits_zero() {
    let dir = project(&[("src/app.js", "const x = a + b;\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--format", "compact"])
        .assert()
        .success();
}

#[test]
fn test_findings_exit_one() {
    let dir = project(&[("src/app.js", "const x = (1);\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--format", "compact"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("OU001"))
        .stdout(predicate::str::contains("Unnecessary parentheses."));
}

#[test]
fn test_json_output() {
    let dir = project(&[("a.js", "obj['foo'] = 1;\n")]);
    let output = omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--format", "json", "a.js"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["total_findings"], 1);
    assert_eq!(value["findings"][0]["message_key"], "useDotNotation");
    assert_eq!(value["findings"][0]["line"], 1);
}

#[test]
fn test_json_output_file() {
    let dir = project(&[("a.js", "if (x) { go(); }\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--format", "json", "--output", "report.json"])
        .assert()
        .code(1);
    let report = read(&dir, "report.json");
    assert!(report.contains("unnecessaryBraces"));
}

#[test]
fn test_fix_rewrites_files() {
    let dir = project(&[(
        "src/app.js",
        "const x = ((1));\nobj['foo'] = x;\nwhile (x) { x--; }\n",
    )]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--fix"])
        .assert()
        .success();
    assert_eq!(read(&dir, "src/app.js"), "const x = 1;\nobj.foo = x;\nwhile (x) x--;\n");
}

#[test]
fn test_fix_leaves_unfixable_findings() {
    let dir = project(&[("a.js", "const y = obj[/* key */ 'foo'];\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--fix", "--format", "compact"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("OU002"));
    assert_eq!(read(&dir, "a.js"), "const y = obj[/* key */ 'foo'];\n");
}

#[test]
fn test_dry_run_does_not_write() {
    let dir = project(&[("a.js", "const x = (1);\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--dry-run"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Would fix"));
    assert_eq!(read(&dir, "a.js"), "const x = (1);\n");
}

#[test]
fn test_max_passes_flag() {
    let dir = project(&[("a.js", "const x = ((1));\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--fix", "--max-passes", "1"])
        .assert()
        .code(1);
    assert_eq!(read(&dir, "a.js"), "const x = (1);\n");
}

#[test]
fn test_disable_flag() {
    let dir = project(&[("a.js", "const x = (1);\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--disable"])
        .assert()
        .success();
}

#[test]
fn test_exclude_and_extensions() {
    let dir = project(&[
        ("src/app.js", "const x = a;\n"),
        ("src/vendor/lib.js", "const x = (1);\n"),
        ("src/types.ts", "const x = (1);\n"),
    ]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--exclude", "**/vendor/**"])
        .assert()
        .success();
}

#[test]
fn test_config_file() {
    let dir = project(&[
        ("a.js", "const x = (1);\n"),
        (".omitparens.toml", "enabled = false\n"),
    ]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_fails() {
    let dir = project(&[("a.js", "x;\n"), ("custom.yml", "max_fix_passes: 0\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "--config", "custom.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_fix_passes"));
}

#[test]
fn test_missing_path_fails() {
    let dir = TempDir::new().unwrap();
    omitparens()
        .current_dir(dir.path())
        .args(["--quiet", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_syntax_error_is_skipped() {
    let dir = project(&[("bad.js", "if (x {\n"), ("good.js", "run();\n")]);
    omitparens()
        .current_dir(dir.path())
        .args(["--format", "compact"])
        .assert()
        .success()
        .stderr(predicate::str::contains("syntax error"));
    assert_eq!(read(&dir, "bad.js"), "if (x {\n");
}

#[test]
fn test_completions() {
    omitparens()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("omitparens"));
}
