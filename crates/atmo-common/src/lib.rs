//! Common types and utilities shared across the atmospheric overlay crates.

pub mod bbox;
pub mod error;
pub mod layer;
pub mod tile;
pub mod time;

pub use bbox::GeoBounds;
pub use error::{AtmoError, AtmoResult};
pub use layer::{Level, VariableKind};
pub use tile::{TileMetadata, TileRequest};
pub use time::{Coverage, ValidTime};
