//! Message catalog.
//!
//! Each message type has a stable code so findings can be suppressed
//! and tracked across releases.

use crate::analyzer::context::Resource;
use crate::analyzer::types::{Message, MessageType, Severity};

/// The proxy running on a pod does not match the injector's version.
pub static ISTIO_PROXY_VERSION_MISMATCH: MessageType = MessageType {
    code: "IST0105",
    name: "IstioProxyVersionMismatch",
    level: Severity::Warning,
    template: "The version of the Istio proxy running on the pod does not match the version used by the istio injector (pod version: {0}; injector version: {1}). This often happens after upgrading the Istio control-plane and can be fixed by redeploying the pod.",
};

static ALL: [&MessageType; 1] = [&ISTIO_PROXY_VERSION_MISMATCH];

/// All message types, in code order.
pub fn all() -> &'static [&'static MessageType] {
    &ALL
}

/// Look up a message type by its code.
pub fn find(code: &str) -> Option<&'static MessageType> {
    all().iter().copied().find(|m| m.code == code)
}

/// Create an `IstioProxyVersionMismatch` message.
pub fn new_istio_proxy_version_mismatch(
    resource: &Resource,
    proxy_version: &str,
    injector_version: &str,
) -> Message {
    Message::new(
        &ISTIO_PROXY_VERSION_MISMATCH,
        Some(resource.to_ref()),
        vec![proxy_version.to_string(), injector_version.to_string()],
    )
}
