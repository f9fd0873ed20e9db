//! Shared test utilities for the atmospheric overlay workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Grid data generators with weather-like value ranges
//! - Grid placements and time fixtures
//!
//! It only produces plain data (`Vec<f32>`, tuples, strings) so that every
//! crate in the workspace can use it without a dependency cycle.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
