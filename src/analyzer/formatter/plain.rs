//! Plain text formatter.

use crate::analyzer::analyze::AnalysisResult;
use crate::analyzer::types::{Diagnostic, Severity};
use colored::Colorize;

/// Format an analysis result as plain text, one message per line, each
/// prefixed with the origin of the resource it is about.
pub fn format(result: &AnalysisResult, colorize: bool) -> String {
    let mut output = String::new();

    for diagnostic in &result.diagnostics {
        output.push_str(&format_line(diagnostic, colorize));
        output.push('\n');
    }

    if result.diagnostics.is_empty() {
        let ok = "\u{2714} No validation issues found.";
        if colorize {
            output.push_str(&ok.green().to_string());
        } else {
            output.push_str(ok);
        }
        output.push('\n');
    } else {
        output.push_str(&format!(
            "\nFound {} issue(s): {} error(s), {} warning(s), {} info.\n",
            result.diagnostics.len(),
            result.count(Severity::Error),
            result.count(Severity::Warning),
            result.count(Severity::Info),
        ));
    }

    if !result.summary.skipped_analyzers.is_empty() {
        output.push_str(&format!(
            "Skipped analyzers: {}\n",
            result.summary.skipped_analyzers.join(", ")
        ));
    }

    output
}

fn format_line(diagnostic: &Diagnostic, colorize: bool) -> String {
    let level = diagnostic.level();
    let label = if colorize {
        match level {
            Severity::Error => level.label().red().bold().to_string(),
            Severity::Warning => level.label().yellow().bold().to_string(),
            Severity::Info => level.label().cyan().to_string(),
        }
    } else {
        level.label().to_string()
    };

    let (location, resource) = match diagnostic.resource() {
        Some(r) => (format!("{}: ", r.origin), format!(" ({})", r)),
        None => (String::new(), String::new()),
    };

    format!(
        "{}{} [{}]{} {}",
        location,
        label,
        diagnostic.code(),
        resource,
        diagnostic.message.text()
    )
}

/// Format for GitHub Actions annotations.
pub fn format_github(result: &AnalysisResult) -> String {
    let mut output = String::new();

    for diagnostic in &result.diagnostics {
        let level = match diagnostic.level() {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "notice",
        };

        let location = match diagnostic.resource() {
            Some(r) => format!(
                " file={},line={}",
                r.origin.file_path.display(),
                r.origin.line.unwrap_or(1)
            ),
            None => String::new(),
        };
        let resource = diagnostic
            .resource()
            .map(|r| format!(" {} -", r))
            .unwrap_or_default();

        output.push_str(&format!(
            "::{}{}::[{}]{} {}\n",
            level,
            location,
            diagnostic.code(),
            resource,
            diagnostic.message.text(),
        ));
    }

    output
}
