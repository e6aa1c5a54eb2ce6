//! Execution report types

use std::collections::BTreeMap;

use rigview_shared::UniformMatrix4;
use serde::{Deserialize, Serialize};

/// Scene variables captured before and after a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Frame number
    pub frame: u64,
    /// Input applied this frame
    pub input: String,
    /// Variables before the frame advanced
    pub pre: BTreeMap<String, f64>,
    /// Variables after the frame advanced
    pub post: BTreeMap<String, f64>,
    /// Changed values only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<BTreeMap<String, String>>,
    /// View matrix composed for the frame
    pub view: UniformMatrix4,
    /// Draw calls issued for the frame
    pub draws: usize,
}

/// Assertion result from execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionResult {
    /// Frame number
    pub frame: u64,
    /// Condition string
    pub condition: String,
    /// Whether the assertion passed
    pub passed: bool,
    /// Actual value observed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    /// Expected value (for failed assertions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

/// Execution report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Report format version
    pub version: String,
    /// Script path, when run from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// RFC 3339 timestamp of the run
    pub executed_at: String,
    /// Wall-clock duration
    pub duration_ms: u64,
    /// Figure driven by the script
    pub figure: String,
    /// Random seed used
    pub seed: u64,
    /// Frames executed
    pub frames_executed: u64,
    /// Total frames in script
    pub total_frames: u64,
    /// Set when an Escape frame ended the run early
    pub exit_requested: bool,
    /// Captured snapshots
    pub snapshots: Vec<Snapshot>,
    /// Assertion results
    pub assertions: Vec<AssertionResult>,
    /// Summary statistics
    pub summary: ReportSummary,
}

/// Report summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of frames with snapshots
    pub frames_with_snap: usize,
    /// Number of passed assertions
    pub assertions_passed: usize,
    /// Number of failed assertions
    pub assertions_failed: usize,
    /// Overall status
    pub status: String,
}

impl ReportSummary {
    pub fn new(snapshots: &[Snapshot], assertions: &[AssertionResult]) -> Self {
        let passed = assertions.iter().filter(|r| r.passed).count();
        let failed = assertions.len() - passed;
        Self {
            frames_with_snap: snapshots.len(),
            assertions_passed: passed,
            assertions_failed: failed,
            status: if failed > 0 { "FAILED" } else { "PASSED" }.to_string(),
        }
    }
}

impl ExecutionReport {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn passed(&self) -> bool {
        self.summary.assertions_failed == 0
    }
}

/// Changed values between `pre` and `post`, formatted as signed deltas
pub fn compute_delta(
    pre: &BTreeMap<String, f64>,
    post: &BTreeMap<String, f64>,
) -> Option<BTreeMap<String, String>> {
    let delta: BTreeMap<String, String> = post
        .iter()
        .filter_map(|(name, after)| {
            let before = pre.get(name)?;
            ((after - before).abs() > 1e-6).then(|| (name.clone(), format!("{:+.2}", after - before)))
        })
        .collect();
    (!delta.is_empty()).then_some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_delta_only_changed() {
        let pre = values(&[("$root_x", 0.0), ("$yaw", 10.0)]);
        let post = values(&[("$root_x", 0.5), ("$yaw", 10.0), ("$frame", 1.0)]);
        let delta = compute_delta(&pre, &post).unwrap();
        assert_eq!(delta.len(), 1);
        assert_eq!(delta["$root_x"], "+0.50");
    }

    #[test]
    fn test_delta_none_when_unchanged() {
        let pre = values(&[("$scale", 1.0)]);
        assert!(compute_delta(&pre, &pre.clone()).is_none());
    }

    #[test]
    fn test_summary_status() {
        let ok = AssertionResult {
            frame: 0,
            condition: "$scale > 0".into(),
            passed: true,
            actual: Some(1.0),
            expected: None,
        };
        let bad = AssertionResult {
            passed: false,
            expected: Some("> 2".into()),
            ..ok.clone()
        };
        assert_eq!(ReportSummary::new(&[], &[ok.clone()]).status, "PASSED");
        let summary = ReportSummary::new(&[], &[ok, bad]);
        assert_eq!(summary.status, "FAILED");
        assert_eq!(summary.assertions_passed, 1);
        assert_eq!(summary.assertions_failed, 1);
    }

    #[test]
    fn test_report_json_shape() {
        let report = ExecutionReport {
            version: "1.0".into(),
            script: None,
            executed_at: "2026-01-01T00:00:00+00:00".into(),
            duration_ms: 3,
            figure: "snowman".into(),
            seed: 1,
            frames_executed: 0,
            total_frames: 0,
            exit_requested: false,
            snapshots: Vec::new(),
            assertions: Vec::new(),
            summary: ReportSummary::new(&[], &[]),
        };
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["summary"]["status"], "PASSED");
        assert!(json.get("script").is_none());
    }
}
