//! Gridded meteorological fields.
//!
//! A field is an immutable rectangular grid of samples anchored at a
//! geographic origin (the north-west corner). Columns run east, rows run
//! south. Missing measurements are stored as `NaN` and surface from every
//! sampling call as `None`.
//!
//! # Example
//!
//! ```
//! use field::{GridGeometry, ScalarField};
//!
//! let geometry = GridGeometry::new(50.0, 120.0, 1.0, 1.0, 3, 3).unwrap();
//! let field = ScalarField::new(geometry, vec![0.0; 9]).unwrap();
//! assert_eq!(field.sample_geo(49.5, 121.5), Some(0.0));
//! assert_eq!(field.sample_geo(10.0, 121.5), None);
//! ```

pub mod document;
pub mod error;
pub mod geometry;
pub mod interpolation;
pub mod scalar;
pub mod vector;

pub use document::FieldDocument;
pub use error::{Axis, FieldError, Result};
pub use geometry::GridGeometry;
pub use interpolation::InterpolationMethod;
pub use scalar::ScalarField;
pub use vector::VectorField;
