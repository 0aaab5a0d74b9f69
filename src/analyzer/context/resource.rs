//! Resource wrappers handed to analyzers.

use k8s_openapi::api::core::v1::{Namespace, Pod};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Namespace assigned to pods that do not name one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Qualified name of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FullName {
    pub namespace: Option<String>,
    pub name: String,
}

impl FullName {
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Where a resource was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
    /// The file path where this resource was defined.
    pub file_path: PathBuf,
    /// Line number in the source file (1-indexed).
    pub line: Option<u32>,
}

impl Origin {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file_path.display(), line),
            None => write!(f, "{}", self.file_path.display()),
        }
    }
}

/// Metadata shared by every resource, independent of its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMetadata {
    pub full_name: FullName,
    pub kind: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl ResourceMetadata {
    fn from_object_meta(kind: &str, full_name: FullName, meta: &ObjectMeta) -> Self {
        Self {
            full_name,
            kind: kind.to_string(),
            labels: meta.labels.clone().unwrap_or_default(),
            annotations: meta.annotations.clone().unwrap_or_default(),
        }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}

/// The typed body of a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Pod(Box<Pod>),
    Namespace(Box<Namespace>),
}

/// A resource from a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub metadata: ResourceMetadata,
    pub origin: Origin,
    pub payload: Payload,
}

impl Resource {
    /// Wrap a pod. Pods without a namespace land in `default`.
    pub fn from_pod(pod: Pod, origin: Origin) -> Self {
        let namespace = pod
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let name = pod.metadata.name.clone().unwrap_or_default();
        let metadata = ResourceMetadata::from_object_meta(
            "Pod",
            FullName::namespaced(namespace, name),
            &pod.metadata,
        );
        Self {
            metadata,
            origin,
            payload: Payload::Pod(Box::new(pod)),
        }
    }

    pub fn from_namespace(namespace: Namespace, origin: Origin) -> Self {
        let name = namespace.metadata.name.clone().unwrap_or_default();
        let metadata = ResourceMetadata::from_object_meta(
            "Namespace",
            FullName::cluster_scoped(name),
            &namespace.metadata,
        );
        Self {
            metadata,
            origin,
            payload: Payload::Namespace(Box::new(namespace)),
        }
    }

    pub fn kind(&self) -> &str {
        &self.metadata.kind
    }

    pub fn full_name(&self) -> &FullName {
        &self.metadata.full_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.full_name.namespace.as_deref()
    }

    pub fn as_pod(&self) -> Option<&Pod> {
        match &self.payload {
            Payload::Pod(pod) => Some(pod),
            _ => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace> {
        match &self.payload {
            Payload::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    /// An owned reference suitable for embedding in reported messages.
    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef {
            kind: self.metadata.kind.clone(),
            full_name: self.metadata.full_name.clone(),
            origin: self.origin.clone(),
        }
    }
}

/// Identifies the resource a message is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceRef {
    pub kind: String,
    pub full_name: FullName,
    pub origin: Origin,
}

impl fmt::Display for ResourceRef {
    /// Renders as `Kind name.namespace`, or `Kind name` when cluster scoped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.full_name.namespace {
            Some(ns) => write!(f, "{} {}.{}", self.kind, self.full_name.name, ns),
            None => write!(f, "{} {}", self.kind, self.full_name.name),
        }
    }
}
