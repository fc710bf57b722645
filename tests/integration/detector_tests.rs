//! Integration tests for each detector
//!
//! Each fixture under `tests/fixtures/js` exercises one kind of redundancy;
//! the tests check which lines are reported and which reports carry a fix.

use omitparens::analysis::detectors::{
    ArrowBodyDetector, Detector, DotNotationDetector, OmitRule, RedundantBracesDetector,
    RedundantParenthesesDetector,
};
use omitparens::analysis::{walk, Issue, LintContext, Linter};
use omitparens::config::Config;
use omitparens::parser::JavaScriptParser;
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/js")
}

fn read_fixture(filename: &str) -> String {
    let path = fixtures_path().join(filename);
    if !path.exists() {
        panic!("Fixture not found: {:?}", path);
    }
    std::fs::read_to_string(path).expect("Failed to read fixture")
}

/// (line, fixable) for every detection of one detector
fn run_detector(detector: &dyn Detector, filename: &str) -> Vec<(usize, bool)> {
    let text = read_fixture(filename);
    let parsed = JavaScriptParser::new()
        .unwrap()
        .parse(&text)
        .expect("Failed to parse fixture");
    let ctx = LintContext::new(&parsed.tree, &parsed.source);
    walk(&ctx, &[detector])
        .iter()
        .map(|d| (parsed.source.line_col(d.range.start).0, d.is_fixable()))
        .collect()
}

// ============================================================================
// Redundant Parentheses
// ============================================================================

mod redundant_parens_tests {
    use super::*;

    #[test]
    fn test_reported_lines() {
        let found = run_detector(&RedundantParenthesesDetector::new(), "parens.js");
        assert_eq!(found, vec![(2, true), (3, true), (5, true), (8, true)]);
    }

    #[test]
    fn test_returned_jsx() {
        let found = run_detector(&RedundantParenthesesDetector::new(), "component.jsx");
        assert_eq!(found, vec![(2, true)]);
    }

    #[test]
    fn test_directive_keeps_grouping() {
        let found = run_detector(&RedundantParenthesesDetector::new(), "hazards.js");
        assert!(found.is_empty());
    }
}

// ============================================================================
// Dot Notation
// ============================================================================

mod dot_notation_tests {
    use super::*;

    #[test]
    fn test_reported_lines() {
        let found = run_detector(&DotNotationDetector::new(), "dot_notation.js");
        assert_eq!(found, vec![(1, true), (2, true), (7, false), (8, false)]);
    }
}

// ============================================================================
// Redundant Braces
// ============================================================================

mod redundant_braces_tests {
    use super::*;

    #[test]
    fn test_reported_lines() {
        let found = run_detector(&RedundantBracesDetector::new(), "braces.js");
        assert_eq!(
            found,
            vec![(1, true), (2, true), (3, true), (3, true), (7, true)]
        );
    }

    #[test]
    fn test_termination_hazards_have_no_fix() {
        let found = run_detector(&RedundantBracesDetector::new(), "hazards.js");
        assert_eq!(found, vec![(2, false), (2, true), (3, false)]);
    }
}

// ============================================================================
// Arrow Bodies
// ============================================================================

mod arrow_body_tests {
    use super::*;

    #[test]
    fn test_reported_lines() {
        let found = run_detector(&ArrowBodyDetector::new(), "arrow.js");
        assert_eq!(found, vec![(1, true), (2, true), (5, false)]);
    }
}

// ============================================================================
// Whole rule
// ============================================================================

mod rule_tests {
    use super::*;

    #[test]
    fn test_clean_fixture_has_no_findings() {
        let linter = Linter::new(&Config::default());
        let report = linter.lint_file(&fixtures_path().join("clean.js")).unwrap();
        assert!(report.is_clean(), "unexpected findings: {:?}", report.findings);
    }

    #[test]
    fn test_rule_runs_every_detector() {
        let rule = OmitRule::new();
        assert_eq!(
            rule.detector_names(),
            vec!["dot-notation", "redundant-parens", "redundant-braces", "arrow-body"]
        );
    }

    #[test]
    fn test_findings_per_fixture() {
        let linter = Linter::new(&Config::default());
        let cases = [
            ("parens.js", Issue::UnnecessaryParens, 4),
            ("dot_notation.js", Issue::UseDotNotation, 4),
            ("braces.js", Issue::UnnecessaryBraces, 5),
            ("arrow.js", Issue::UnnecessaryBraces, 3),
            ("component.jsx", Issue::UnnecessaryParens, 1),
        ];
        for (fixture, issue, count) in cases {
            let report = linter.lint_file(&fixtures_path().join(fixture)).unwrap();
            assert_eq!(report.findings.len(), count, "{}", fixture);
            assert!(report.findings.iter().all(|f| f.issue == issue), "{}", fixture);
        }
    }

    #[test]
    fn test_findings_sorted_by_position() {
        let linter = Linter::new(&Config::default());
        let report = linter.lint_file(&fixtures_path().join("braces.js")).unwrap();
        let positions: Vec<_> = report.findings.iter().map(|f| (f.line, f.column)).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let linter = Linter::new(&Config::default());
        let result = linter.lint_source(std::path::Path::new("broken.js"), "if (x {");
        assert!(matches!(result, Err(omitparens::Error::Syntax { .. })));
    }
}
