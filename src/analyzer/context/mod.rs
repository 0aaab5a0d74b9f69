//! Analysis context for resource snapshots.
//!
//! A snapshot holds every loaded resource grouped by collection. The
//! analysis context gives analyzers read access to a snapshot and a sink
//! to report messages into.

pub mod resource;

pub use resource::{FullName, Origin, Payload, Resource, ResourceMetadata, ResourceRef};

use crate::analyzer::collection::{self, CollectionName};
use crate::analyzer::types::{Diagnostic, Message};
use std::collections::{BTreeMap, BTreeSet};

/// Read access to a snapshot plus a report sink, as seen by an analyzer.
///
/// `'s` is the lifetime of the underlying snapshot, so analyzers may hold
/// on to visited resources until they are done.
pub trait AnalysisContext<'s> {
    /// Visit every resource in `collection` until `visitor` returns `false`.
    fn for_each(&self, collection: CollectionName, visitor: &mut dyn FnMut(&'s Resource) -> bool);

    /// Report a message against `collection`.
    fn report(&mut self, collection: CollectionName, message: Message);
}

/// An immutable, point-in-time set of resources.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    loaded: BTreeSet<CollectionName>,
    resources: BTreeMap<CollectionName, Vec<Resource>>,
}

impl Snapshot {
    /// Start a snapshot with every known collection marked as loaded.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new(collection::all())
    }

    /// Whether `collection` was loaded into this snapshot (possibly empty).
    pub fn has_collection(&self, collection: CollectionName) -> bool {
        self.loaded.contains(&collection)
    }

    pub fn resources(&self, collection: CollectionName) -> &[Resource] {
        self.resources
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of resources across all collections.
    pub fn len(&self) -> usize {
        self.resources.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a resource by collection and full name.
    pub fn find(&self, collection: CollectionName, name: &FullName) -> Option<&Resource> {
        self.resources(collection)
            .iter()
            .find(|r| r.full_name() == name)
    }
}

/// Collects resources into a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    fn new(collections: &[CollectionName]) -> Self {
        Self {
            snapshot: Snapshot {
                loaded: collections.iter().copied().collect(),
                resources: BTreeMap::new(),
            },
        }
    }

    /// Restrict the set of collections considered loaded.
    pub fn with_collections(mut self, collections: &[CollectionName]) -> Self {
        self.snapshot.loaded = collections.iter().copied().collect();
        self.snapshot
            .resources
            .retain(|c, _| collections.contains(c));
        self
    }

    /// Add a resource. Resources of collections that are not loaded are dropped.
    pub fn add(&mut self, resource: Resource) -> &mut Self {
        let Some(collection) = CollectionName::for_kind(resource.kind()) else {
            log::debug!("Ignoring resource of unknown kind {}", resource.kind());
            return self;
        };
        if !self.snapshot.loaded.contains(&collection) {
            log::debug!(
                "Ignoring {} {}: collection {} is not loaded",
                resource.kind(),
                resource.full_name(),
                collection
            );
            return self;
        }
        self.snapshot
            .resources
            .entry(collection)
            .or_default()
            .push(resource);
        self
    }

    pub fn extend(&mut self, resources: impl IntoIterator<Item = Resource>) -> &mut Self {
        for resource in resources {
            self.add(resource);
        }
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

/// In-memory [`AnalysisContext`] over a [`Snapshot`].
#[derive(Debug)]
pub struct SnapshotContext<'s> {
    snapshot: &'s Snapshot,
    analyzer: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> SnapshotContext<'s> {
    /// Create a context whose reports are attributed to `analyzer`.
    pub fn new(snapshot: &'s Snapshot, analyzer: impl Into<String>) -> Self {
        Self {
            snapshot,
            analyzer: analyzer.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'s> AnalysisContext<'s> for SnapshotContext<'s> {
    fn for_each(&self, collection: CollectionName, visitor: &mut dyn FnMut(&'s Resource) -> bool) {
        let snapshot: &'s Snapshot = self.snapshot;
        for resource in snapshot.resources(collection) {
            if !visitor(resource) {
                break;
            }
        }
    }

    fn report(&mut self, collection: CollectionName, message: Message) {
        self.diagnostics
            .push(Diagnostic::new(self.analyzer.clone(), collection, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::collection::{NAMESPACES, PODS};
    use k8s_openapi::api::core::v1::{Namespace, Pod};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn pod(name: &str) -> Resource {
        Resource::from_pod(
            Pod {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    namespace: Some("shop".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            Origin::new("pods.yaml"),
        )
    }

    fn namespace(name: &str) -> Resource {
        Resource::from_namespace(
            Namespace {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            Origin::new("ns.yaml"),
        )
    }

    #[test]
    fn test_builder_groups_by_collection() {
        let mut builder = Snapshot::builder();
        builder.add(pod("a")).add(pod("b")).add(namespace("shop"));
        let snapshot = builder.build();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.resources(PODS).len(), 2);
        assert_eq!(snapshot.resources(NAMESPACES).len(), 1);
        assert!(snapshot.has_collection(PODS));
        assert!(
            snapshot
                .find(PODS, &FullName::namespaced("shop", "b"))
                .is_some()
        );
    }

    #[test]
    fn test_restricted_collections_drop_resources() {
        let mut builder = Snapshot::builder().with_collections(&[PODS]);
        builder.add(pod("a")).add(namespace("shop"));
        let snapshot = builder.build();

        assert!(!snapshot.has_collection(NAMESPACES));
        assert!(snapshot.resources(NAMESPACES).is_empty());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_for_each_stops_when_visitor_returns_false() {
        let mut builder = Snapshot::builder();
        builder.extend(vec![pod("a"), pod("b"), pod("c")]);
        let snapshot = builder.build();
        let ctx = SnapshotContext::new(&snapshot, "test");

        let mut seen = Vec::new();
        ctx.for_each(PODS, &mut |r| {
            seen.push(r.full_name().name.clone());
            seen.len() < 2
        });
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::builder().build();
        assert!(snapshot.is_empty());
        let ctx = SnapshotContext::new(&snapshot, "test");
        let mut visited = 0;
        ctx.for_each(NAMESPACES, &mut |_| {
            visited += 1;
            true
        });
        assert_eq!(visited, 0);
        assert!(ctx.diagnostics().is_empty());
    }
}
