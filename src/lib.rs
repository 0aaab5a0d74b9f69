//! # meshlint
//!
//! Static analysis for service mesh configuration. meshlint loads a snapshot
//! of Kubernetes resources (from YAML files, directories or stdin) and runs
//! analyzers over it, reporting Istio-style coded messages.
//!
//! ## Features
//!
//! - **Snapshot loading**: multi-document YAML and `kind: List` dumps
//! - **Version skew detection**: sidecar proxies that differ from the running injector (`IST0105`)
//! - **Suppression**: per-resource annotations and `CODE=RESOURCE` rules
//! - **Multiple formats**: plain text, JSON, YAML and GitHub annotations
//!
//! ## Example
//!
//! ```rust,no_run
//! use meshlint::analyzer::{AnalyzerConfig, analyze};
//! use std::path::Path;
//!
//! let result = analyze(&[Path::new("./cluster-dump.yaml")], &AnalyzerConfig::default());
//! for diagnostic in &result.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! ```

pub mod analyzer;
pub mod cli;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::{AnalysisResult, AnalyzerConfig, analyze, analyze_content};
pub use error::{MeshlintError, Result};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
