//! Proxy version skew detection.
//!
//! Compares the version of every running sidecar injector against the
//! proxy version of each injected pod in an injection-enabled namespace.

use std::collections::{BTreeSet, HashSet};

use k8s_openapi::api::core::v1::Pod;

use crate::analyzer::collection::{NAMESPACES, PODS};
use crate::analyzer::context::{AnalysisContext, Resource};
use crate::analyzer::extract::container::{container_version, containers_named, find_container};
use crate::analyzer::injection::{
    APP_LABEL, INJECTION_LABEL_ENABLE_VALUE, INJECTION_LABEL_NAME, INJECTOR_CONTAINER_NAME,
    PROXY_CONTAINER_NAME, PROXY_IMAGE_ANNOTATION, SIDECAR_INJECTOR_APP,
};
use crate::analyzer::{Analyzer, Metadata, msg};

/// Checks the version of auto-injection configured with the running proxies on pods.
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionAnalyzer;

/// A pod together with the proxy version detected on it.
#[derive(Debug)]
struct PodVersion<'s> {
    resource: &'s Resource,
    proxy_version: &'s str,
}

impl Analyzer for VersionAnalyzer {
    fn metadata(&self) -> Metadata {
        Metadata {
            name: "injection.VersionAnalyzer",
            description: "Checks the version of auto-injection configured with the running proxies on pods",
            inputs: vec![NAMESPACES, PODS],
        }
    }

    fn analyze<'s>(&self, ctx: &mut dyn AnalysisContext<'s>) {
        let mut injected_namespaces: HashSet<String> = HashSet::new();

        ctx.for_each(NAMESPACES, &mut |r| {
            if r.metadata.label(INJECTION_LABEL_NAME) == Some(INJECTION_LABEL_ENABLE_VALUE) {
                injected_namespaces.insert(r.full_name().to_string());
            }
            true
        });

        let mut injector_versions: BTreeSet<&'s str> = BTreeSet::new();
        let mut pod_versions: Vec<PodVersion<'s>> = Vec::new();

        ctx.for_each(PODS, &mut |r| {
            let Some(pod) = r.as_pod() else {
                log::warn!("{} in the pod collection has no pod payload", r.full_name());
                return true;
            };

            if let Some(version) = sidecar_injector_version(r, pod) {
                injector_versions.insert(version);
            }

            if !injected_namespaces.contains(r.namespace().unwrap_or_default()) {
                return true;
            }

            // A pinned proxy image always wins over the injector.
            if r
                .metadata
                .annotation(PROXY_IMAGE_ANNOTATION)
                .is_some_and(|image| !image.is_empty())
            {
                return true;
            }

            for container in containers_named(pod, PROXY_CONTAINER_NAME) {
                let Some(version) = container_version(container) else {
                    continue;
                };
                pod_versions.push(PodVersion {
                    resource: r,
                    proxy_version: version,
                });
            }
            true
        });

        log::debug!(
            "{} injected namespace(s), injector version(s) {:?}, {} pod(s) with a proxy version",
            injected_namespaces.len(),
            injector_versions,
            pod_versions.len()
        );

        for injector_version in &injector_versions {
            for pv in &pod_versions {
                if pv.proxy_version != *injector_version {
                    ctx.report(
                        PODS,
                        msg::new_istio_proxy_version_mismatch(
                            pv.resource,
                            pv.proxy_version,
                            injector_version,
                        ),
                    );
                }
            }
        }
    }
}

/// The injector version if `pod` is a sidecar injector webhook pod.
fn sidecar_injector_version<'s>(resource: &'s Resource, pod: &'s Pod) -> Option<&'s str> {
    if resource.metadata.label(APP_LABEL) != Some(SIDECAR_INJECTOR_APP) {
        return None;
    }
    find_container(pod, INJECTOR_CONTAINER_NAME).and_then(container_version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::context::{Origin, Snapshot, SnapshotContext};
    use k8s_openapi::api::core::v1::{Container, Namespace, PodSpec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn string_map(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn namespace(name: &str, injection: Option<&str>) -> Resource {
        let labels = injection
            .map(|v| string_map(&[(INJECTION_LABEL_NAME, v)]))
            .unwrap_or_default();
        Resource::from_namespace(
            Namespace {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    labels,
                    ..Default::default()
                },
                ..Default::default()
            },
            Origin::new("namespaces.yaml"),
        )
    }

    fn pod(
        name: &str,
        namespace: &str,
        labels: &[(&str, &str)],
        annotations: &[(&str, &str)],
        containers: &[(&str, &str)],
    ) -> Resource {
        Resource::from_pod(
            Pod {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    namespace: Some(namespace.to_string()),
                    labels: string_map(labels),
                    annotations: string_map(annotations),
                    ..Default::default()
                },
                spec: Some(PodSpec {
                    containers: containers
                        .iter()
                        .map(|(name, image)| Container {
                            name: name.to_string(),
                            image: Some(image.to_string()),
                            ..Default::default()
                        })
                        .collect(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Origin::new("pods.yaml"),
        )
    }

    fn injector(name: &str, version: &str) -> Resource {
        let image = format!("docker.io/istio/sidecar_injector:{}", version);
        pod(
            name,
            "istio-system",
            &[(APP_LABEL, SIDECAR_INJECTOR_APP)],
            &[],
            &[(INJECTOR_CONTAINER_NAME, image.as_str())],
        )
    }

    fn workload(name: &str, namespace: &str, proxy_image: &str) -> Resource {
        pod(
            name,
            namespace,
            &[(APP_LABEL, "reviews")],
            &[],
            &[
                ("reviews", "docker.io/istio/examples-bookinfo-reviews-v1:1.15.0"),
                (PROXY_CONTAINER_NAME, proxy_image),
            ],
        )
    }

    /// Run the analyzer and return `(pod, proxy version, injector version)` triples.
    fn run(resources: Vec<Resource>) -> Vec<(String, String, String)> {
        let mut builder = Snapshot::builder();
        builder.extend(resources);
        let snapshot = builder.build();

        let mut ctx = SnapshotContext::new(&snapshot, "injection.VersionAnalyzer");
        VersionAnalyzer.analyze(&mut ctx);

        let mut findings: Vec<_> = ctx
            .into_diagnostics()
            .into_iter()
            .map(|d| {
                assert_eq!(d.collection, PODS);
                assert_eq!(d.code(), "IST0105");
                let resource = d.resource().map(|r| r.full_name.to_string()).unwrap_or_default();
                let params = &d.message.parameters;
                (resource, params[0].clone(), params[1].clone())
            })
            .collect();
        findings.sort();
        findings
    }

    fn triple(pod: &str, proxy: &str, injector: &str) -> (String, String, String) {
        (pod.to_string(), proxy.to_string(), injector.to_string())
    }

    #[test]
    fn test_metadata() {
        let meta = VersionAnalyzer.metadata();
        assert_eq!(meta.name, "injection.VersionAnalyzer");
        assert_eq!(meta.inputs, vec![NAMESPACES, PODS]);
    }

    #[test]
    fn test_single_mismatch() {
        let findings = run(vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            workload("details-v1", "default", "docker.io/istio/proxyv2:1.1.0"),
        ]);
        assert_eq!(findings, vec![triple("default/details-v1", "1.1.0", "1.2.0")]);
    }

    #[test]
    fn test_matching_version_is_clean() {
        let findings = run(vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            workload("details-v1", "default", "docker.io/istio/proxyv2:1.2.0"),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_namespace_without_injection_label() {
        let findings = run(vec![
            namespace("default", None),
            namespace("legacy", Some("disabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            workload("details-v1", "default", "proxyv2:1.1.0"),
            workload("ratings-v1", "legacy", "proxyv2:1.1.0"),
            workload("orphan", "not-in-snapshot", "proxyv2:1.1.0"),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_injection_label_value_is_case_sensitive() {
        let findings = run(vec![
            namespace("default", Some("Enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            workload("details-v1", "default", "proxyv2:1.1.0"),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_proxy_image_override_is_skipped() {
        let overridden = pod(
            "pinned",
            "default",
            &[],
            &[(PROXY_IMAGE_ANNOTATION, "docker.io/istio/proxyv2:1.0.0")],
            &[(PROXY_CONTAINER_NAME, "docker.io/istio/proxyv2:1.0.0")],
        );
        let findings = run(vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            overridden,
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_empty_override_annotation_is_ignored() {
        let annotated = pod(
            "annotated",
            "default",
            &[],
            &[(PROXY_IMAGE_ANNOTATION, "")],
            &[(PROXY_CONTAINER_NAME, "proxyv2:1.0.0")],
        );
        let findings = run(vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            annotated,
        ]);
        assert_eq!(findings, vec![triple("default/annotated", "1.0.0", "1.2.0")]);
    }

    #[test]
    fn test_unparseable_proxy_image_is_skipped() {
        let findings = run(vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            workload("no-tag", "default", "docker.io/istio/proxyv2"),
            workload("with-port", "default", "registry:5000/istio/proxyv2:1.1.0"),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_pod_without_proxy_container() {
        let plain = pod("plain", "default", &[], &[], &[("app", "shop:1.0.0")]);
        let findings = run(vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            plain,
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_no_injector_means_no_findings() {
        let findings = run(vec![
            namespace("default", Some("enabled")),
            workload("details-v1", "default", "proxyv2:1.1.0"),
            workload("ratings-v1", "default", "proxyv2:1.0.0"),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_injector_requires_app_label_and_container_name() {
        let wrong_label = pod(
            "fake-injector",
            "istio-system",
            &[(APP_LABEL, "sidecar-injector")],
            &[],
            &[(INJECTOR_CONTAINER_NAME, "sidecar_injector:9.9.9")],
        );
        let wrong_container = pod(
            "other-injector",
            "istio-system",
            &[(APP_LABEL, SIDECAR_INJECTOR_APP)],
            &[],
            &[("webhook", "sidecar_injector:8.8.8")],
        );
        let findings = run(vec![
            namespace("default", Some("enabled")),
            wrong_label,
            wrong_container,
            workload("details-v1", "default", "proxyv2:1.1.0"),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_injector_with_unparseable_image_is_ignored() {
        let findings = run(vec![
            namespace("default", Some("enabled")),
            pod(
                "istio-sidecar-injector-1",
                "istio-system",
                &[(APP_LABEL, SIDECAR_INJECTOR_APP)],
                &[],
                &[(INJECTOR_CONTAINER_NAME, "localhost:5000/sidecar_injector:1.2.0")],
            ),
            workload("details-v1", "default", "proxyv2:1.1.0"),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_injector_namespace_does_not_matter() {
        let findings = run(vec![
            namespace("default", Some("enabled")),
            pod(
                "injector-in-default",
                "default",
                &[(APP_LABEL, SIDECAR_INJECTOR_APP)],
                &[],
                &[(INJECTOR_CONTAINER_NAME, "sidecar_injector:1.3.0")],
            ),
            workload("details-v1", "default", "proxyv2:1.1.0"),
        ]);
        assert_eq!(findings, vec![triple("default/details-v1", "1.1.0", "1.3.0")]);
    }

    #[test]
    fn test_rolling_injector_upgrade() {
        let findings = run(vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-old", "1.2.0"),
            injector("istio-sidecar-injector-new", "1.3.0"),
            injector("istio-sidecar-injector-new-2", "1.3.0"),
            workload("current", "default", "proxyv2:1.2.0"),
            workload("stale", "default", "proxyv2:1.1.0"),
        ]);
        assert_eq!(
            findings,
            vec![
                triple("default/current", "1.2.0", "1.3.0"),
                triple("default/stale", "1.1.0", "1.2.0"),
                triple("default/stale", "1.1.0", "1.3.0"),
            ]
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let resources = vec![
            namespace("default", Some("enabled")),
            injector("istio-sidecar-injector-1", "1.2.0"),
            workload("a", "default", "proxyv2:1.1.0"),
            workload("b", "default", "proxyv2:1.0.0"),
        ];
        let first = run(resources.clone());
        let second = run(resources);
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }
}
