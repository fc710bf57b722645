//! Pre-order traversal driving the detectors

use super::detectors::Detector;
use super::{Detection, LintContext};

/// Visit every node once, in source order, handing it to each detector
///
/// Detections come back sorted by position.
pub fn walk(ctx: &LintContext<'_>, detectors: &[&dyn Detector]) -> Vec<Detection> {
    let mut detections = Vec::new();
    for node in ctx.tree.descendants(ctx.tree.root()) {
        for detector in detectors {
            detector.check(ctx, node, &mut detections);
        }
    }
    detections.sort_by_key(|d| (d.range.start, d.range.end));
    detections.dedup_by(|a, b| a.node == b.node && a.issue == b.issue);
    detections
}
