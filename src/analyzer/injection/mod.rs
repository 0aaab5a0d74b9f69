//! Analyzers for automatic sidecar injection.
//!
//! The constants below follow the Istio cluster conventions and are
//! matched case-sensitively.

pub mod version;

pub use version::VersionAnalyzer;

/// Namespace label that requests automatic sidecar injection.
pub const INJECTION_LABEL_NAME: &str = "istio-injection";

/// Value of [`INJECTION_LABEL_NAME`] that enables injection.
pub const INJECTION_LABEL_ENABLE_VALUE: &str = "enabled";

/// Pod label carrying the application name.
pub const APP_LABEL: &str = "app";

/// Value of [`APP_LABEL`] on sidecar injector webhook pods.
pub const SIDECAR_INJECTOR_APP: &str = "sidecarInjectorWebhook";

/// Container running the injector webhook inside injector pods.
pub const INJECTOR_CONTAINER_NAME: &str = "sidecar-injector-webhook";

/// Sidecar proxy container injected into workload pods.
pub const PROXY_CONTAINER_NAME: &str = "istio-proxy";

/// Pod annotation that pins the proxy image, bypassing the injector's choice.
pub const PROXY_IMAGE_ANNOTATION: &str = "sidecar.istio.io/proxyImage";
