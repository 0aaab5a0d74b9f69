//! Configuration for meshlint analysis.
//!
//! - Analyzer inclusion/exclusion
//! - Message suppression rules
//! - Path ignoring
//! - Output and failure thresholds

use crate::analyzer::Analyzer;
use crate::analyzer::types::{Diagnostic, Severity};
use crate::error::{MeshlintError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// File names searched by [`AnalyzerConfig::load_from_default`].
pub const DEFAULT_CONFIG_FILES: &[&str] = &[".meshlint.yaml", ".meshlint.yml"];

/// Configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Analyzer names to run. Empty means every built-in analyzer.
    #[serde(default)]
    pub include: Vec<String>,

    /// Analyzer names never to run.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Suppression rules of the form `CODE=RESOURCE`.
    #[serde(default)]
    pub suppress: Vec<SuppressionRule>,

    /// Glob patterns for paths to ignore.
    #[serde(default)]
    pub ignore_paths: Vec<String>,

    /// Diagnostics below this level are not reported.
    #[serde(default = "default_output_threshold")]
    pub output_threshold: Severity,

    /// Diagnostics at or above this level fail the run.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: Severity,

    /// If true, never fail the run.
    #[serde(default)]
    pub no_fail: bool,
}

fn default_output_threshold() -> Severity {
    Severity::Info
}

fn default_failure_threshold() -> Severity {
    Severity::Error
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            suppress: Vec::new(),
            ignore_paths: Vec::new(),
            output_threshold: default_output_threshold(),
            failure_threshold: default_failure_threshold(),
            no_fail: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an analyzer to the include list.
    pub fn include(mut self, analyzer: impl Into<String>) -> Self {
        self.include.push(analyzer.into());
        self
    }

    /// Add an analyzer to the exclude list.
    pub fn exclude(mut self, analyzer: impl Into<String>) -> Self {
        self.exclude.push(analyzer.into());
        self
    }

    pub fn suppress(mut self, rule: SuppressionRule) -> Self {
        self.suppress.push(rule);
        self
    }

    /// Add a path pattern to ignore.
    pub fn ignore_path(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_paths.push(pattern.into());
        self
    }

    pub fn with_output_threshold(mut self, threshold: Severity) -> Self {
        self.output_threshold = threshold;
        self
    }

    pub fn with_failure_threshold(mut self, threshold: Severity) -> Self {
        self.failure_threshold = threshold;
        self
    }

    pub fn is_analyzer_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }

    pub fn is_analyzer_included(&self, name: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|i| i == name)
    }

    /// Select the analyzers to run from `available`.
    pub fn resolve_analyzers<'a>(&self, available: &'a [Box<dyn Analyzer>]) -> Vec<&'a dyn Analyzer> {
        available
            .iter()
            .map(|a| a.as_ref())
            .filter(|a| {
                let name = a.metadata().name;
                !self.is_analyzer_excluded(name) && self.is_analyzer_included(name)
            })
            .collect()
    }

    /// Whether a diagnostic matches one of the suppression rules.
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        self.suppress.iter().any(|rule| rule.matches(diagnostic))
    }

    /// Check if a file path should be ignored based on ignore_paths patterns.
    pub fn should_ignore_path(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.ignore_paths.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|glob| glob.matches(&path_str))
                || path_str.contains(pattern.as_str())
        })
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MeshlintError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        Self::load_from_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| MeshlintError::Config(e.to_string()))
    }

    /// Try to load config from the default locations in the working directory.
    pub fn load_from_default() -> Option<Self> {
        for filename in DEFAULT_CONFIG_FILES {
            let path = Path::new(filename);
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => return Some(config),
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }
        None
    }
}

/// Suppresses messages with a code for resources matching a pattern.
///
/// Written as `CODE=RESOURCE`, e.g. `IST0105=Pod details-*.default`. The
/// code may be `*` and the resource is a glob matched against the resource
/// display (`Kind name.namespace`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuppressionRule {
    pub code: String,
    pub resource: String,
}

impl SuppressionRule {
    pub fn parse(rule: &str) -> Result<Self> {
        let Some((code, resource)) = rule.split_once('=') else {
            return Err(MeshlintError::InvalidSuppression(rule.to_string()));
        };
        let (code, resource) = (code.trim(), resource.trim());
        if code.is_empty() || resource.is_empty() || glob::Pattern::new(resource).is_err() {
            return Err(MeshlintError::InvalidSuppression(rule.to_string()));
        }
        Ok(Self {
            code: code.to_string(),
            resource: resource.to_string(),
        })
    }

    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        if self.code != "*" && self.code != diagnostic.code() {
            return false;
        }
        let Some(resource) = diagnostic.resource() else {
            return false;
        };
        glob::Pattern::new(&self.resource).is_ok_and(|p| p.matches(&resource.to_string()))
    }
}

impl TryFrom<String> for SuppressionRule {
    type Error = MeshlintError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SuppressionRule> for String {
    fn from(rule: SuppressionRule) -> Self {
        rule.to_string()
    }
}

impl fmt::Display for SuppressionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.code, self.resource)
    }
}

impl std::str::FromStr for SuppressionRule {
    type Err = MeshlintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
