//! Map projections for the overlay renderer.
//!
//! Implements spherical Mercator from scratch without external dependencies.

pub mod mercator;

pub use mercator::{ProjectionError, SphericalMercator, ViewProjection};
