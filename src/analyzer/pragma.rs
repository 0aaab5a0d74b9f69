//! Annotation-based message suppression.
//!
//! A resource annotated with `galley.istio.io/analyze-suppress` lists the
//! message codes (comma separated, or `*` for all) that must not be
//! reported against it.

use crate::analyzer::context::Resource;
use std::collections::HashSet;

/// Annotation holding the suppressed message codes.
pub const SUPPRESS_ANNOTATION: &str = "galley.istio.io/analyze-suppress";

/// Extract the set of suppressed codes from a resource's annotations.
pub fn suppressed_codes(resource: &Resource) -> HashSet<&str> {
    resource
        .metadata
        .annotation(SUPPRESS_ANNOTATION)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Check if messages with `code` are suppressed for a resource.
pub fn should_suppress(resource: &Resource, code: &str) -> bool {
    let codes = suppressed_codes(resource);
    codes.contains("*") || codes.contains(code)
}
