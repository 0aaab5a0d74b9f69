use crate::analyzer::{self, AnalyzerConfig, Severity, SuppressionRule, msg};
use crate::error::MeshlintError;
use crate::cli::{ColorChoice, OutputFormat};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Options for the `analyze` command, as given on the command line.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub paths: Vec<PathBuf>,
    pub output: OutputFormat,
    pub output_threshold: Option<Severity>,
    pub failure_threshold: Option<Severity>,
    pub suppress: Vec<SuppressionRule>,
    pub analyzers: Vec<String>,
    pub no_fail: bool,
    pub color: ColorChoice,
}

/// Build the analyzer configuration: file settings first, then command line
/// overrides.
pub fn build_config(config_path: Option<&Path>, options: &AnalyzeOptions) -> crate::Result<AnalyzerConfig> {
    let mut config = match config_path {
        Some(path) => AnalyzerConfig::load_from_file(path)?,
        None => AnalyzerConfig::load_from_default().unwrap_or_default(),
    };

    config.include.extend(options.analyzers.iter().cloned());
    config.suppress.extend(options.suppress.iter().cloned());
    if let Some(threshold) = options.output_threshold {
        config.output_threshold = threshold;
    }
    if let Some(threshold) = options.failure_threshold {
        config.failure_threshold = threshold;
    }
    config.no_fail |= options.no_fail;

    Ok(config)
}

/// Suppression rules whose code is neither `*` nor a known message code.
fn unknown_suppression_codes(config: &AnalyzerConfig) -> Vec<&str> {
    config
        .suppress
        .iter()
        .map(|rule| rule.code.as_str())
        .filter(|code| *code != "*" && msg::find(code).is_none())
        .collect()
}

/// Run the analysis and print the result.
///
/// Returns whether the run passed the failure threshold. Input paths that
/// cannot be read are an error, reported after the output is printed.
pub fn handle_analyze(config_path: Option<&Path>, options: AnalyzeOptions) -> crate::Result<bool> {
    let config = build_config(config_path, &options)?;

    for name in &config.include {
        if !analyzer::all_analyzers().iter().any(|a| a.metadata().name == name) {
            log::warn!("Unknown analyzer '{}'", name);
        }
    }
    for code in unknown_suppression_codes(&config) {
        log::warn!("Suppression rule for unknown message code '{}'", code);
    }

    let paths: Vec<&Path> = options.paths.iter().map(PathBuf::as_path).collect();
    let result = analyzer::analyze(&paths, &config);

    for error in &result.parse_errors {
        eprintln!("Error: {}", error);
    }

    let colorize = match options.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
            true
        }
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    analyzer::format_result(&result, options.output.into(), colorize);

    if !result.failed_inputs.is_empty() {
        return Err(MeshlintError::InputFailed(result.failed_inputs.len()));
    }
    Ok(result.summary.passed)
}
