//! Output formatters for analysis results.

pub mod json;
pub mod plain;
pub mod report;
pub mod yaml;

use crate::analyzer::analyze::AnalysisResult;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Plain,
    /// JSON output.
    Json,
    /// YAML output.
    Yaml,
    /// GitHub Actions annotations.
    GitHub,
}

/// Format an analysis result to a string.
///
/// `colorize` only affects plain text output.
pub fn format_result_to_string(result: &AnalysisResult, format: OutputFormat, colorize: bool) -> String {
    match format {
        OutputFormat::Plain => plain::format(result, colorize),
        OutputFormat::Json => json::format(result),
        OutputFormat::Yaml => yaml::format(result),
        OutputFormat::GitHub => plain::format_github(result),
    }
}

/// Format and print an analysis result.
pub fn format_result(result: &AnalysisResult, format: OutputFormat, colorize: bool) {
    print!("{}", format_result_to_string(result, format, colorize));
}
