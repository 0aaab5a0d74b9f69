//! Main analysis orchestration.
//!
//! Ties together snapshot loading, analyzers, suppression and thresholds
//! to provide the main analysis API.

use crate::analyzer::config::AnalyzerConfig;
use crate::analyzer::context::{Snapshot, SnapshotContext};
use crate::analyzer::parser::{ParseOutput, yaml};
use crate::analyzer::types::{Diagnostic, Severity};
use crate::analyzer::{all_analyzers, pragma};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Result of analyzing a snapshot.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Reported diagnostics, sorted and filtered.
    pub diagnostics: Vec<Diagnostic>,
    /// Input that could not be loaded.
    pub parse_errors: Vec<String>,
    /// Paths given to [`analyze`] that could not be read at all.
    pub failed_inputs: Vec<PathBuf>,
    pub summary: AnalysisSummary,
}

/// Summary of an analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSummary {
    pub resources_analyzed: usize,
    pub analyzers_run: usize,
    /// Analyzers whose input collections were not loaded.
    pub skipped_analyzers: Vec<String>,
    /// Diagnostics dropped by suppression rules or annotations.
    pub suppressed: usize,
    /// Whether the run passed (no diagnostics at or above the failure threshold).
    pub passed: bool,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            parse_errors: Vec::new(),
            failed_inputs: Vec::new(),
            summary: AnalysisSummary {
                passed: true,
                ..Default::default()
            },
        }
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Get the maximum severity in the results.
    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics.iter().map(Diagnostic::level).max()
    }

    /// Count diagnostics of a given level.
    pub fn count(&self, level: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.level() == level).count()
    }

    /// Check if the results should cause a non-zero exit.
    pub fn should_fail(&self, config: &AnalyzerConfig) -> bool {
        if config.no_fail {
            return false;
        }
        self.max_severity()
            .is_some_and(|max| max >= config.failure_threshold)
    }

    /// Drop diagnostics below a severity threshold.
    pub fn filter_by_threshold(&mut self, threshold: Severity) {
        self.diagnostics.retain(|d| d.level() >= threshold);
    }

    pub fn sort(&mut self) {
        self.diagnostics.sort();
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze resources loaded from files, directories or `-` (stdin).
pub fn analyze(paths: &[&Path], config: &AnalyzerConfig) -> AnalysisResult {
    let mut loaded = ParseOutput::default();
    let mut fatal = Vec::new();
    let mut failed_inputs = Vec::new();

    for path in paths {
        match load_path(path, config) {
            Ok(output) => {
                loaded.resources.extend(output.resources);
                loaded.errors.extend(output.errors);
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                fatal.push(e.to_string());
                failed_inputs.push(path.to_path_buf());
            }
        }
    }

    let mut builder = Snapshot::builder();
    builder.extend(loaded.resources);
    let snapshot = builder.build();

    let mut result = analyze_snapshot(&snapshot, config);
    result.parse_errors = fatal
        .into_iter()
        .chain(loaded.errors.iter().map(ToString::to_string))
        .collect();
    if !failed_inputs.is_empty() {
        result.summary.passed = false;
    }
    result.failed_inputs = failed_inputs;
    result
}

/// Analyze YAML content directly.
pub fn analyze_content(content: &str, config: &AnalyzerConfig) -> AnalysisResult {
    let parsed = match yaml::parse_yaml(content) {
        Ok(parsed) => parsed,
        Err(e) => {
            let mut result = AnalysisResult::new();
            result.parse_errors.push(e.to_string());
            return result;
        }
    };

    let mut builder = Snapshot::builder();
    builder.extend(parsed.resources);
    let snapshot = builder.build();

    let mut result = analyze_snapshot(&snapshot, config);
    result.parse_errors = parsed.errors.iter().map(ToString::to_string).collect();
    result
}

fn load_path(path: &Path, config: &AnalyzerConfig) -> crate::Result<ParseOutput> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return yaml::parse_yaml(&content);
    }

    if config.should_ignore_path(path) {
        log::debug!("Ignoring {}", path.display());
        return Ok(ParseOutput::default());
    }

    if path.is_dir() {
        Ok(yaml::parse_yaml_dir(path, |p| config.should_ignore_path(p)))
    } else {
        yaml::parse_yaml_file(path)
    }
}

/// Run every enabled analyzer over a snapshot.
pub fn analyze_snapshot(snapshot: &Snapshot, config: &AnalyzerConfig) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    result.summary.resources_analyzed = snapshot.len();

    let available = all_analyzers();
    for analyzer in config.resolve_analyzers(&available) {
        let metadata = analyzer.metadata();

        let missing: Vec<_> = metadata
            .inputs
            .iter()
            .filter(|c| !snapshot.has_collection(**c))
            .collect();
        if !missing.is_empty() {
            log::info!(
                "Skipping analyzer {}: input collection(s) {:?} not loaded",
                metadata.name,
                missing
            );
            result.summary.skipped_analyzers.push(metadata.name.to_string());
            continue;
        }

        log::debug!("Running analyzer {}", metadata.name);
        let mut ctx = SnapshotContext::new(snapshot, metadata.name);
        analyzer.analyze(&mut ctx);
        result.summary.analyzers_run += 1;

        for diagnostic in ctx.into_diagnostics() {
            if is_suppressed(snapshot, config, &diagnostic) {
                result.summary.suppressed += 1;
                continue;
            }
            result.diagnostics.push(diagnostic);
        }
    }

    result.filter_by_threshold(config.output_threshold);
    result.sort();
    result.summary.passed = !result.should_fail(config);

    result
}

fn is_suppressed(snapshot: &Snapshot, config: &AnalyzerConfig, diagnostic: &Diagnostic) -> bool {
    if config.is_suppressed(diagnostic) {
        return true;
    }
    diagnostic
        .resource()
        .and_then(|r| snapshot.find(diagnostic.collection, &r.full_name))
        .is_some_and(|resource| pragma::should_suppress(resource, diagnostic.code()))
}
