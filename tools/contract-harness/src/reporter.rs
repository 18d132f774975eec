//! Formats PASS/FAIL lines and the closing summary.

use std::fmt::Write as _;

use crate::{fixture::Fixture, runner::RunResult};

#[derive(Debug, Default)]
pub struct Reporter {
    passed: usize,
    failed: Vec<String>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one result and return the lines printed for it.
    pub fn record(&mut self, fixture: &Fixture, result: &RunResult) -> String {
        let key = format!("{}/{}", fixture.group, fixture.id);
        if result.passed() {
            self.passed += 1;
            return format!("PASS  [{key}] {}", fixture.description);
        }

        let mut out = format!("FAIL  [{key}] {}", fixture.description);
        if let Some(err) = &result.error {
            let _ = write!(out, "\n        error: {err}");
        } else if let Some(actual) = result.actual_status {
            if actual != result.expected_status {
                let _ = write!(
                    out,
                    "\n        {} {} -> expected {}, got {}",
                    fixture.request.method, fixture.request.path, result.expected_status, actual
                );
            }
            for mismatch in &result.header_mismatches {
                let _ = write!(out, "\n        header: {mismatch}");
            }
            if let Some(mismatch) = &result.body_mismatch {
                let _ = write!(out, "\n        {mismatch}");
            }
        }
        let _ = write!(out, "\n        request id: {}", result.request_id);
        self.failed.push(key);
        out
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "Results: {} passed, {} failed",
            self.passed,
            self.failed.len()
        );
        for key in &self.failed {
            let _ = write!(out, "\n  failed: {key}");
        }
        out
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }
}
