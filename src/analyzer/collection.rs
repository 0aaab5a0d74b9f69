//! Named collections of typed resources.
//!
//! Analyzers declare the collections they read; the snapshot groups
//! resources by collection when they are loaded.

use serde::Serialize;
use std::fmt;

/// Name of a typed resource collection, e.g. `k8s/core/v1/pods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CollectionName(&'static str);

impl CollectionName {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Map a Kubernetes `kind` to the collection its resources belong to.
    pub fn for_kind(kind: &str) -> Option<Self> {
        all().iter().copied().find(|c| c.kind() == Some(kind))
    }

    /// The Kubernetes kind stored in this collection.
    pub fn kind(&self) -> Option<&'static str> {
        match *self {
            NAMESPACES => Some("Namespace"),
            PODS => Some("Pod"),
            _ => None,
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const NAMESPACES: CollectionName = CollectionName::new("k8s/core/v1/namespaces");
pub const PODS: CollectionName = CollectionName::new("k8s/core/v1/pods");

/// Every collection meshlint knows how to load.
pub fn all() -> &'static [CollectionName] {
    &[NAMESPACES, PODS]
}
