//! JSON formatter.

use crate::analyzer::analyze::AnalysisResult;
use crate::analyzer::formatter::report::Report;

/// Format an analysis result as JSON.
pub fn format(result: &AnalysisResult) -> String {
    let report = Report::from(result);
    let mut output = serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string());
    output.push('\n');
    output
}
