//! Snapshot loading from Kubernetes YAML.

pub mod yaml;

pub use yaml::{ParseOutput, parse_yaml, parse_yaml_dir, parse_yaml_file, parse_yaml_with_path};
