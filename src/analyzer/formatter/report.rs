//! Serializable view of an analysis result, shared by the JSON and YAML
//! formatters.

use crate::analyzer::analyze::AnalysisResult;
use crate::analyzer::types::Diagnostic;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    pub messages: Vec<ReportMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parse_errors: Vec<String>,
    pub summary: ReportSummary,
}

#[derive(Debug, Serialize)]
pub struct ReportMessage {
    pub code: String,
    pub name: String,
    pub level: String,
    pub analyzer: String,
    pub collection: String,
    pub resource: Option<String>,
    pub origin: Option<String>,
    pub message: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub resources_analyzed: usize,
    pub analyzers_run: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_analyzers: Vec<String>,
    pub suppressed: usize,
    pub total_messages: usize,
    pub passed: bool,
}

impl From<&AnalysisResult> for Report {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            messages: result.diagnostics.iter().map(ReportMessage::from).collect(),
            parse_errors: result.parse_errors.clone(),
            summary: ReportSummary {
                resources_analyzed: result.summary.resources_analyzed,
                analyzers_run: result.summary.analyzers_run,
                skipped_analyzers: result.summary.skipped_analyzers.clone(),
                suppressed: result.summary.suppressed,
                total_messages: result.diagnostics.len(),
                passed: result.summary.passed,
            },
        }
    }
}

impl From<&Diagnostic> for ReportMessage {
    fn from(d: &Diagnostic) -> Self {
        Self {
            code: d.code().to_string(),
            name: d.message.message_type.name.to_string(),
            level: d.level().to_string(),
            analyzer: d.analyzer.clone(),
            collection: d.collection.to_string(),
            resource: d.resource().map(ToString::to_string),
            origin: d.resource().map(|r| r.origin.to_string()),
            message: d.message.text(),
            parameters: d.message.parameters.clone(),
        }
    }
}
