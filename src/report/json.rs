//! JSON output for a run.
//!
//! Emits one object with the overall verdict, counts, and every result in
//! run order, for CI tooling that consumes prguard output.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use super::ReportFormatter;
use crate::config::FailureLevel;
use crate::results::{CheckStatus, CheckSuiteResults};

/// Formats results as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

#[derive(Serialize)]
struct JsonOutput<'a> {
    success: bool,
    summary: JsonSummary,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    passed: usize,
    failed: usize,
    errors: usize,
    blocking: usize,
    warnings: usize,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    check_type: &'a str,
    status: CheckStatus,
    failure_level: FailureLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "no_details")]
    details: &'a BTreeMap<String, Value>,
}

fn no_details(details: &&BTreeMap<String, Value>) -> bool {
    details.is_empty()
}

impl JsonReport {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonReport {
    fn format<W: Write + ?Sized>(
        &self,
        results: &CheckSuiteResults,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let output = JsonOutput {
            success: results.is_success(),
            summary: JsonSummary {
                total: results.len(),
                passed: results.passes().len(),
                failed: results.failures().len(),
                errors: results.errors().len(),
                blocking: results.blocking().len(),
                warnings: results.warnings().len(),
            },
            results: results
                .iter()
                .map(|r| JsonResult {
                    check_type: r.check_type(),
                    status: r.status,
                    failure_level: r.config.failure_level,
                    error_code: r.error_code.as_deref(),
                    message: r.message.as_deref(),
                    details: &r.details,
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
