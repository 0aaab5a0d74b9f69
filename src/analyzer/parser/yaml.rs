//! YAML parsing for Kubernetes resource snapshots.
//!
//! Accepts multi-document files as written by hand or by
//! `kubectl get -o yaml` (including `kind: List` wrappers). Only the kinds
//! meshlint has collections for are kept.

use crate::analyzer::context::{Origin, Resource};
use crate::error::{MeshlintError, Result};
use k8s_openapi::api::core::v1::{Namespace, Pod};
use serde_yaml::Value;
use std::path::Path;

/// Resources parsed from one or more documents, plus per-resource errors.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub resources: Vec<Resource>,
    /// Documents that were skipped because they could not be loaded.
    pub errors: Vec<MeshlintError>,
}

impl ParseOutput {
    fn merge(&mut self, mut other: ParseOutput) {
        self.resources.append(&mut other.resources);
        self.errors.append(&mut other.errors);
    }
}

/// Parse a YAML string containing one or more Kubernetes resources.
pub fn parse_yaml(content: &str) -> Result<ParseOutput> {
    parse_yaml_with_path(content, Path::new("<stdin>"))
}

/// Parse YAML content with a source file path.
///
/// A syntax error fails the whole input; a well-formed document whose body
/// does not match its kind is recorded in [`ParseOutput::errors`].
pub fn parse_yaml_with_path(content: &str, path: &Path) -> Result<ParseOutput> {
    let mut output = ParseOutput::default();

    for (line, doc) in split_documents(content) {
        let value: Value = serde_yaml::from_str(&doc).map_err(|e| MeshlintError::Yaml {
            path: path.to_path_buf(),
            line: e.location().map_or(line, |l| line + l.line() as u32 - 1),
            message: e.to_string(),
        })?;
        if value.is_null() {
            continue;
        }
        parse_document(value, path, line, &mut output);
    }

    Ok(output)
}

/// Parse a YAML file.
pub fn parse_yaml_file(path: &Path) -> Result<ParseOutput> {
    let content = std::fs::read_to_string(path).map_err(|source| MeshlintError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_yaml_with_path(&content, path)
}

/// Parse all YAML files under a directory (recursively).
///
/// Files for which `ignore` returns true are skipped. Files that fail to
/// parse are recorded as errors and do not stop the walk.
pub fn parse_yaml_dir(path: &Path, ignore: impl Fn(&Path) -> bool) -> ParseOutput {
    let mut output = ParseOutput::default();

    let mut files: Vec<_> = walkdir::WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_yaml(p))
        .collect();
    files.sort();

    for file in files {
        if ignore(&file) {
            log::debug!("Ignoring {}", file.display());
            continue;
        }
        match parse_yaml_file(&file) {
            Ok(parsed) => output.merge(parsed),
            Err(e) => {
                log::warn!("Failed to parse {}: {}", file.display(), e);
                output.errors.push(e);
            }
        }
    }

    output
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Split content into `(first line, document)` pairs on `---` separators.
fn split_documents(content: &str) -> Vec<(u32, String)> {
    let mut documents = Vec::new();
    let mut current = String::new();
    let mut start: Option<u32> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx as u32 + 1;
        if line == "---" || line.starts_with("--- ") {
            if let Some(start) = start.take() {
                documents.push((start, std::mem::take(&mut current)));
            }
            current.clear();
            continue;
        }
        let trimmed = line.trim();
        if start.is_none() && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }
        start.get_or_insert(line_number);
        current.push_str(line);
        current.push('\n');
    }
    if let Some(start) = start {
        documents.push((start, current));
    }

    documents
}

fn parse_document(value: Value, path: &Path, line: u32, output: &mut ParseOutput) {
    let Some(kind) = value.get("kind").and_then(Value::as_str).map(str::to_string) else {
        log::debug!("Skipping document without a kind in {}:{}", path.display(), line);
        return;
    };

    let origin = Origin::new(path).with_line(line);
    match kind.as_str() {
        "Pod" => match serde_yaml::from_value::<Pod>(value) {
            Ok(pod) => output.resources.push(Resource::from_pod(pod, origin)),
            Err(e) => output.errors.push(invalid(&kind, path, line, e)),
        },
        "Namespace" => match serde_yaml::from_value::<Namespace>(value) {
            Ok(ns) => output.resources.push(Resource::from_namespace(ns, origin)),
            Err(e) => output.errors.push(invalid(&kind, path, line, e)),
        },
        list if list.ends_with("List") => {
            let items = match value.get("items") {
                Some(Value::Sequence(items)) => items.clone(),
                _ => Vec::new(),
            };
            for item in items {
                parse_document(item, path, line, output);
            }
        }
        other => log::debug!("Skipping {} in {}:{}", other, path.display(), line),
    }
}

fn invalid(kind: &str, path: &Path, line: u32, e: serde_yaml::Error) -> MeshlintError {
    MeshlintError::InvalidResource {
        kind: kind.to_string(),
        path: path.to_path_buf(),
        line,
        message: e.to_string(),
    }
}
