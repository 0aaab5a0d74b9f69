//! Core types for meshlint analysis.
//!
//! - `Severity` - Message severity levels
//! - `MessageType` - Static catalog entry (code, name, level, template)
//! - `Message` - A single finding reported by an analyzer
//! - `Diagnostic` - A message enriched with the analyzer and collection it came from

use crate::analyzer::collection::CollectionName;
use crate::analyzer::context::ResourceRef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity levels for analysis messages.
///
/// Ordered from most severe to least severe:
/// `Error > Warning > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Configuration that is definitely broken
    Error,
    /// Configuration that is likely to misbehave
    #[default]
    Warning,
    /// Informational findings
    Info,
}

impl Severity {
    /// Parse a severity from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Short label used in plain-text output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warning => 1,
            Self::Info => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A catalog entry describing one kind of message.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageType {
    /// Stable code, e.g. `IST0105`.
    pub code: &'static str,
    /// CamelCase name, e.g. `IstioProxyVersionMismatch`.
    pub name: &'static str,
    /// Default severity.
    pub level: Severity,
    /// Message template; `{0}`, `{1}`, ... are replaced by parameters.
    pub template: &'static str,
}

/// A single finding reported by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message_type: &'static MessageType,
    /// The resource the message is about, if any.
    pub resource: Option<ResourceRef>,
    /// Template parameters, in order.
    pub parameters: Vec<String>,
}

impl Message {
    /// Create a new message for a resource.
    pub fn new(
        message_type: &'static MessageType,
        resource: Option<ResourceRef>,
        parameters: Vec<String>,
    ) -> Self {
        Self {
            message_type,
            resource,
            parameters,
        }
    }

    pub fn code(&self) -> &'static str {
        self.message_type.code
    }

    pub fn level(&self) -> Severity {
        self.message_type.level
    }

    /// Render the template with the message parameters.
    pub fn text(&self) -> String {
        let mut text = self.message_type.template.to_string();
        for (i, param) in self.parameters.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", i), param);
        }
        text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.level().label(), self.code())?;
        if let Some(resource) = &self.resource {
            write!(f, " ({})", resource)?;
        }
        write!(f, " {}", self.text())
    }
}

/// A message together with the analyzer and collection it was reported for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the analyzer that produced the message.
    pub analyzer: String,
    /// Collection the message was reported against.
    pub collection: CollectionName,
    pub message: Message,
}

impl Diagnostic {
    pub fn new(analyzer: impl Into<String>, collection: CollectionName, message: Message) -> Self {
        Self {
            analyzer: analyzer.into(),
            collection,
            message,
        }
    }

    pub fn code(&self) -> &'static str {
        self.message.code()
    }

    pub fn level(&self) -> Severity {
        self.message.level()
    }

    pub fn resource(&self) -> Option<&ResourceRef> {
        self.message.resource.as_ref()
    }

    fn sort_key(&self) -> (String, u32, String, &'static str, String) {
        let (file, line, resource) = match self.resource() {
            Some(r) => (
                r.origin.file_path.display().to_string(),
                r.origin.line.unwrap_or(0),
                r.to_string(),
            ),
            None => (String::new(), 0, String::new()),
        };
        (file, line, resource, self.code(), self.message.text())
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.analyzer.cmp(&other.analyzer))
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
