//! # Analyzer Module
//!
//! Analyzes a snapshot of Kubernetes resources for service-mesh
//! configuration problems and reports them as diagnostics.
//!
//! # Features
//!
//! - Multi-document YAML and `kind: List` snapshot loading
//! - Typed Pod / Namespace payloads
//! - Annotation and rule based message suppression
//! - Multiple output formats (plain text, JSON, YAML, GitHub annotations)
//!
//! # Example
//!
//! ```rust,no_run
//! use meshlint::analyzer::{AnalyzerConfig, analyze};
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::default();
//! let result = analyze(&[Path::new("./cluster-dump.yaml")], &config);
//!
//! for diagnostic in &result.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! ```
//!
//! # Analyzers
//!
//! - `injection.VersionAnalyzer`: proxy sidecars whose version differs from
//!   the running sidecar injector (`IST0105`)

pub mod analyze;
pub mod collection;
pub mod config;
pub mod context;
pub mod extract;
pub mod formatter;
pub mod injection;
pub mod msg;
pub mod parser;
pub mod pragma;
pub mod types;

pub use analyze::{AnalysisResult, AnalysisSummary, analyze, analyze_content, analyze_snapshot};
pub use collection::CollectionName;
pub use config::{AnalyzerConfig, SuppressionRule};
pub use context::{AnalysisContext, Resource, Snapshot, SnapshotContext};
pub use formatter::{OutputFormat, format_result, format_result_to_string};
pub use types::{Diagnostic, Message, MessageType, Severity};

/// Static description of an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Unique name, e.g. `injection.VersionAnalyzer`.
    pub name: &'static str,
    pub description: &'static str,
    /// Collections that must be loaded before the analyzer can run.
    pub inputs: Vec<CollectionName>,
}

/// An analyzer inspects a snapshot through an [`AnalysisContext`] and
/// reports messages back into it.
///
/// Analyzers hold no state between invocations.
pub trait Analyzer: Send + Sync {
    fn metadata(&self) -> Metadata;

    fn analyze<'s>(&self, ctx: &mut dyn AnalysisContext<'s>);
}

/// All built-in analyzers.
pub fn all_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![Box::new(injection::VersionAnalyzer)]
}
