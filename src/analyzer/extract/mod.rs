//! Extractors for resource data.
//!
//! Helper functions to pull specific fields out of typed payloads
//! for use in analyzers.

pub mod container;

pub use container::*;
