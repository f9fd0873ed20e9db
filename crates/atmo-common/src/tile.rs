//! Tile metadata and URL templating for time-sliced grid tiles.
//!
//! The tile service publishes a metadata document of the form
//!
//! ```json
//! {
//!   "url": "http://tiles.example.com/{valid_time}/{level}/{e}.bin",
//!   "surface": { "valid_time": ["202401010000", "202401010100"] }
//! }
//! ```
//!
//! Every key other than `url` names a level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{AtmoError, AtmoResult, Coverage, Level, ValidTime, VariableKind};

pub const VALID_TIME_PLACEHOLDER: &str = "{valid_time}";
pub const LEVEL_PLACEHOLDER: &str = "{level}";
pub const ELEMENT_PLACEHOLDER: &str = "{e}";

/// Time slices published for one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelEntry {
    pub valid_time: Vec<ValidTime>,
}

/// Parsed tile metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMetadata {
    /// URL template with `{valid_time}`, `{level}` and optionally `{e}`.
    pub url: String,

    #[serde(flatten)]
    pub levels: BTreeMap<Level, LevelEntry>,
}

impl TileMetadata {
    /// Parse and validate a metadata document.
    pub fn from_json(json: &str) -> AtmoResult<Self> {
        let metadata: TileMetadata = serde_json::from_str(json)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Load and validate a metadata document from disk.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AtmoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> AtmoResult<()> {
        if !self.url.contains(VALID_TIME_PLACEHOLDER) {
            return Err(AtmoError::invalid_config(
                "url",
                format!("template must contain {}", VALID_TIME_PLACEHOLDER),
            ));
        }
        if self.levels.is_empty() {
            return Err(AtmoError::invalid_config("levels", "no levels published"));
        }
        for (level, entry) in &self.levels {
            if entry.valid_time.is_empty() {
                return Err(AtmoError::invalid_config(
                    level.as_str(),
                    "valid_time list is empty",
                ));
            }
        }
        Ok(())
    }

    /// Coverage of a level: its first and last published valid times.
    pub fn coverage(&self, level: &Level) -> AtmoResult<Coverage> {
        let entry = self
            .levels
            .get(level)
            .ok_or_else(|| AtmoError::UnknownLevel(level.to_string()))?;

        match (entry.valid_time.first(), entry.valid_time.last()) {
            (Some(first), Some(last)) => Coverage::new(*first, *last),
            _ => Err(AtmoError::invalid_config(
                level.as_str(),
                "valid_time list is empty",
            )),
        }
    }

    /// Build a request for `kind` at `level`, clamping `requested` into the
    /// level's coverage.
    pub fn request(
        &self,
        kind: VariableKind,
        level: Level,
        requested: ValidTime,
    ) -> AtmoResult<TileRequest> {
        let instant = self.coverage(&level)?.resolve(requested);
        Ok(TileRequest {
            kind,
            level,
            instant,
        })
    }
}

/// A fully resolved tile address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRequest {
    pub kind: VariableKind,
    pub level: Level,
    pub instant: ValidTime,
}

impl TileRequest {
    /// Substitute the request into a URL template.
    ///
    /// An `http:` scheme is dropped so the URL stays protocol-relative.
    /// Wind keeps its `{e}` placeholder: the vector fetcher fills it once per
    /// component.
    pub fn url(&self, template: &str) -> String {
        let mut url = template
            .replacen("http:", "", 1)
            .replace(VALID_TIME_PLACEHOLDER, &self.instant.compact())
            .replace(LEVEL_PLACEHOLDER, self.level.as_str());

        if !self.kind.is_vector() {
            url = url.replace(ELEMENT_PLACEHOLDER, self.kind.code());
        }

        url
    }

    /// Zoom levels to fetch for this request.
    pub fn tile_zooms(&self) -> &'static [u8] {
        self.level.tile_zooms()
    }
}
