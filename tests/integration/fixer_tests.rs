//! Integration tests for multi-pass fixing
//!
//! Fixtures are rewritten with `fix_source` and compared with the expected
//! output; fixed text must parse and must be stable under a second run.

use omitparens::analysis::detectors::OmitRule;
use omitparens::analysis::Linter;
use omitparens::config::Config;
use omitparens::parser::JavaScriptParser;
use omitparens::refactor::{fix_source, EditOutcome, FileEditor, FixResult};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/js")
}

fn fix_text(text: &str) -> FixResult {
    let mut parser = JavaScriptParser::new().unwrap();
    fix_source(&mut parser, &OmitRule::new(), text, 10).expect("fix failed")
}

fn fix_fixture(filename: &str) -> FixResult {
    let text = fs::read_to_string(fixtures_path().join(filename)).unwrap();
    fix_text(&text)
}

/// Fixing the fixed text again changes nothing
fn assert_stable(result: &FixResult) {
    let again = fix_text(result.text());
    assert!(!again.changed(), "second run changed:\n{}", result.text());
}

#[test]
fn test_fix_parens_fixture() {
    let result = fix_fixture("parens.js");
    assert_eq!(
        result.text(),
        "async function run() {\n  const a = 1;\n  const b = await load();\n  const c = (a + b) * 2;\n  return a;\n}\n\nconst f = () => value;\nconst g = () => ({ a: 1 });\nconst h = () => (a, b);\n"
    );
    assert!(result.remaining.is_empty());
    assert_stable(&result);
}

#[test]
fn test_fix_braces_fixture() {
    let result = fix_fixture("braces.js");
    assert_eq!(
        result.text(),
        "for (let i = 0; i < 10; i++) step(i);\nwhile (busy) wait();\nif (ready) start(); else stop();\nif (a) { one(); two(); }\nif (b) { const local = 1; }\nif (c) { if (d) run(); }\ndo tick(); while (running);\n"
    );
    assert_eq!(result.applied, 5);
    assert_stable(&result);
}

#[test]
fn test_fix_dot_notation_fixture() {
    let result = fix_fixture("dot_notation.js");
    let lines: Vec<&str> = result.text().lines().collect();
    assert_eq!(lines[0], "obj.foo = 1;");
    assert_eq!(lines[1], "const x = obj.bar;");
    assert_eq!(lines[2], "const y = obj['foo-bar'];");
    assert_eq!(lines[6], "const u = obj[/* why */ 'baz'];");
    assert_eq!(lines[7], "const t = 1['toFixed'];");
    assert_eq!(result.remaining.len(), 2);
    assert!(result.remaining.iter().all(|d| !d.is_fixable()));
}

#[test]
fn test_fix_arrow_fixture() {
    let result = fix_fixture("arrow.js");
    let lines: Vec<&str> = result.text().lines().collect();
    assert_eq!(lines[0], "const one = () => 1;");
    assert_eq!(lines[1], "const obj = () => ({ a: 1 });");
    assert_eq!(lines[2], "const two = (x) => { log(x); return x; };");
    assert_eq!(lines[4], "const kept = () => { /* keep */ return 2; };");
    assert_eq!(result.remaining.len(), 1);
    assert_stable(&result);
}

#[test]
fn test_fix_returned_jsx() {
    let result = fix_fixture("component.jsx");
    assert_eq!(
        result.text(),
        "function App() {\n  return <div>\n      <span>hi</span>\n    </div>;\n}\n"
    );
    assert_stable(&result);
}

#[test]
fn test_hazards_keep_valid_code() {
    let result = fix_fixture("hazards.js");
    assert_eq!(
        result.text(),
        "(\"use strict\");\nif (x) { go() } else stop()\nwhile (x) { a = b }\n(c || d).run();\n"
    );
    assert_eq!(result.remaining.len(), 2);
}

#[test]
fn test_clean_fixture_untouched() {
    let text = fs::read_to_string(fixtures_path().join("clean.js")).unwrap();
    let result = fix_text(&text);
    assert!(!result.changed());
    assert_eq!(result.text(), text);
}

#[test]
fn test_nested_grouping_peeled_per_pass() {
    let result = fix_text("const x = (((1)));");
    assert_eq!(result.text(), "const x = 1;");
    assert_eq!(result.passes, 3);
}

#[test]
fn test_nested_returned_jsx_peeled_per_pass() {
    let result = fix_text("function f() { return ((<div/>)) }");
    assert_eq!(result.text(), "function f() { return <div/> }");
    assert_eq!(result.passes, 2);
    assert!(result.remaining.is_empty());
}

#[test]
fn test_unwrapped_blocks_do_not_fuse_with_keywords() {
    let result = fix_text("if(a){b();}else{c();}");
    assert_eq!(result.text(), "if(a)b();else c();");
    assert_stable(&result);

    let result = fix_text("do{x();}while(y);z()");
    assert_eq!(result.text(), "do x();while(y);z()");
    assert_stable(&result);
}

#[test]
fn test_overlapping_rewrites_settle_over_passes() {
    let result = fix_text("const f = () => { return (x); };");
    assert_eq!(result.text(), "const f = () => x;");
    assert_eq!(result.passes, 2);
}

#[test]
fn test_file_editor_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.js");
    fs::copy(fixtures_path().join("braces.js"), &path).unwrap();

    let linter = Linter::new(&Config::default());
    let fix = FileEditor::new(false, false, 10)
        .with_messages(false)
        .fix_file(&linter, &path)
        .unwrap();
    assert_eq!(fix.outcome, EditOutcome::Written);
    assert!(fix.report.is_clean());

    let report = linter.lint_file(&path).unwrap();
    assert!(report.is_clean());
}
