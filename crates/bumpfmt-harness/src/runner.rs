//! Test execution engine.

use bumpfmt_core::malloc::DEFAULT_ARENA_CAPACITY;
use bumpfmt_core::{Arg, ConfigError, FmtError, ScratchArena, sprintf};
use serde::{Deserialize, Serialize};

use crate::diff::render_diff;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{
    EVENT_CASE_RESULT, EVENT_RUN_SUMMARY, LogEmitter, LogEntry, LogLevel, Outcome,
};

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub case_name: String,
    pub template: String,
    pub passed: bool,
    /// Expected output, or `error:<kind>`.
    pub expected: String,
    /// Actual output (lossy UTF-8), or `error:<kind>`.
    pub actual: String,
    /// Bytes produced when the call succeeded.
    pub bytes: Option<usize>,
    /// Error kind when the call failed.
    pub error: Option<String>,
    /// Diff if the case failed.
    pub diff: Option<String>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            total,
            passed,
            failed: total - passed,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run every case in a set. Each case gets a fresh arena.
    #[must_use]
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set.cases.iter().map(verify_case).collect()
    }

    /// [`TestRunner::run`], logging a `case_result` line per case and a
    /// closing `run_summary` line.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let results = self.run(fixture_set);
        for result in &results {
            log.emit_entry(case_entry(result))?;
        }

        let passed = results.iter().filter(|r| r.passed).count();
        let all_passed = passed == results.len();
        let summary = LogEntry::new(
            "",
            if all_passed { LogLevel::Info } else { LogLevel::Error },
            EVENT_RUN_SUMMARY,
        )
        .with_outcome(Outcome::from_passed(all_passed))
        .with_details(serde_json::json!({
            "campaign": self.campaign,
            "family": fixture_set.family,
            "total": results.len(),
            "passed": passed,
            "failed": results.len() - passed,
        }));
        log.emit_entry(summary)?;
        log.flush()?;
        Ok(results)
    }
}

fn case_entry(result: &VerificationResult) -> LogEntry {
    let level = if result.passed {
        LogLevel::Info
    } else {
        LogLevel::Error
    };
    let mut entry = LogEntry::new("", level, EVENT_CASE_RESULT)
        .with_case(&result.case_name)
        .with_template(&result.template)
        .with_outcome(Outcome::from_passed(result.passed));
    if let Some(bytes) = result.bytes {
        entry = entry.with_bytes(bytes);
    }
    if let Some(kind) = &result.error {
        entry = entry.with_error(kind);
    }
    if !result.passed {
        entry = entry.with_details(serde_json::json!({
            "expected": result.expected,
            "actual": result.actual,
            "diff": result.diff,
        }));
    }
    entry
}

/// What one case produced.
enum Execution {
    Output(Vec<u8>),
    Failed(FmtError),
    InvalidConfig(ConfigError),
}

fn execute_case(case: &FixtureCase) -> Execution {
    let overrides = case.config.clone().unwrap_or_default();
    let config = match overrides.to_config() {
        Ok(config) => config,
        Err(err) => return Execution::InvalidConfig(err),
    };
    let mut arena =
        ScratchArena::new(overrides.arena_capacity.unwrap_or(DEFAULT_ARENA_CAPACITY));
    let args: Vec<Arg<'_>> = case.args.iter().map(|a| a.to_arg()).collect();
    let template = case.template.as_bytes();

    // Earlier calls only consume arena space; the first failure ends the case.
    for _ in 1..overrides.repeat.unwrap_or(1) {
        if let Err(err) = sprintf(&mut arena, &config, template, &args) {
            return Execution::Failed(err);
        }
    }
    match sprintf(&mut arena, &config, template, &args) {
        Ok(out) => Execution::Output(out),
        Err(err) => Execution::Failed(err),
    }
}

fn verify_case(case: &FixtureCase) -> VerificationResult {
    let expected = case.expected();
    let (actual, bytes, error, passed) = match execute_case(case) {
        Execution::Output(out) => {
            let passed = case.expected_error.is_none() && out == expected.as_bytes();
            (
                String::from_utf8_lossy(&out).into_owned(),
                Some(out.len()),
                None,
                passed,
            )
        }
        Execution::Failed(err) => {
            let kind = err.kind();
            let passed = case.expected_error.as_deref() == Some(kind);
            (format!("error:{kind}"), None, Some(kind.to_string()), passed)
        }
        Execution::InvalidConfig(err) => (format!("config_error:{err}"), None, None, false),
    };

    let diff = (!passed).then(|| render_diff(expected.as_bytes(), actual.as_bytes()));
    VerificationResult {
        case_name: case.name.clone(),
        template: case.template.clone(),
        passed,
        expected,
        actual,
        bytes,
        error,
        diff,
    }
}
