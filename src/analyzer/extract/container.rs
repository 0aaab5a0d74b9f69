//! Container and image extraction utilities.

use k8s_openapi::api::core::v1::{Container, Pod};

/// Regular containers of a pod (init containers are not included).
pub fn containers(pod: &Pod) -> &[Container] {
    pod.spec
        .as_ref()
        .map(|spec| spec.containers.as_slice())
        .unwrap_or_default()
}

/// All containers of a pod with the given name, in declaration order.
pub fn containers_named<'a>(pod: &'a Pod, name: &'a str) -> impl Iterator<Item = &'a Container> {
    containers(pod).iter().filter(move |c| c.name == name)
}

/// The first container of a pod with the given name.
pub fn find_container<'a>(pod: &'a Pod, name: &str) -> Option<&'a Container> {
    containers(pod).iter().find(|c| c.name == name)
}

/// Parse the version (tag) out of an image reference.
///
/// The reference must split on `:` into exactly two parts with a non-empty
/// tag. References without a tag, or with more than one colon (such as a
/// registry with a port, `host:5000/repo:tag`), have no version.
pub fn image_version(image: &str) -> Option<&str> {
    let mut parts = image.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(tag), None) if !tag.is_empty() => Some(tag),
        _ => None,
    }
}

/// The image version of a container, if its image has one.
pub fn container_version(container: &Container) -> Option<&str> {
    container.image.as_deref().and_then(image_version)
}
