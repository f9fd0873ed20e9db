//! Meteorological variables and vertical levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The physical quantity carried by a field.
///
/// Each kind maps to the GRIB element code used in tile URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariableKind {
    /// 2-component wind vector (u, v) in m/s.
    Wind,
    /// Air temperature in Kelvin (`TMP`).
    Temperature,
    /// Total cloud cover in percent (`TCDC`).
    CloudCover,
    /// Precipitation rate in mm/h (`APCP`).
    Precipitation,
    /// Pressure reduced to mean sea level in Pa (`PRMSL`).
    Pressure,
    /// Any other element code; rendered without units.
    Other(String),
}

impl VariableKind {
    /// Parse an element code such as `"TMP"` or `"wind"`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "wind" | "WIND" => VariableKind::Wind,
            "TMP" => VariableKind::Temperature,
            "TCDC" => VariableKind::CloudCover,
            "APCP" => VariableKind::Precipitation,
            "PRMSL" => VariableKind::Pressure,
            other => VariableKind::Other(other.to_string()),
        }
    }

    /// Element code used in tile URL templates.
    pub fn code(&self) -> &str {
        match self {
            VariableKind::Wind => "wind",
            VariableKind::Temperature => "TMP",
            VariableKind::CloudCover => "TCDC",
            VariableKind::Precipitation => "APCP",
            VariableKind::Pressure => "PRMSL",
            VariableKind::Other(code) => code,
        }
    }

    /// Vector kinds carry (u, v) samples instead of scalars.
    pub fn is_vector(&self) -> bool {
        matches!(self, VariableKind::Wind)
    }
}

impl From<String> for VariableKind {
    fn from(code: String) -> Self {
        VariableKind::from_code(&code)
    }
}

impl From<VariableKind> for String {
    fn from(kind: VariableKind) -> Self {
        kind.code().to_string()
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A vertical level identifier as used by the tile service (`"surface"`, `"850"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub String);

impl Level {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn surface() -> Self {
        Self("surface".to_string())
    }

    pub fn is_surface(&self) -> bool {
        self.0 == "surface"
    }

    /// Zoom levels at which tiles exist for this level.
    ///
    /// Surface data is published at two resolutions, upper levels at one.
    pub fn tile_zooms(&self) -> &'static [u8] {
        if self.is_surface() {
            &[0, 1]
        } else {
            &[0]
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in ["wind", "TMP", "TCDC", "APCP", "PRMSL", "RH"] {
            assert_eq!(VariableKind::from_code(code).code(), code);
        }
        assert_eq!(
            VariableKind::from_code("RH"),
            VariableKind::Other("RH".to_string())
        );
    }

    #[test]
    fn test_serde_as_code() {
        let kind: VariableKind = serde_json::from_str("\"PRMSL\"").unwrap();
        assert_eq!(kind, VariableKind::Pressure);
        assert_eq!(serde_json::to_string(&VariableKind::Wind).unwrap(), "\"wind\"");
    }

    #[test]
    fn test_tile_zooms() {
        assert_eq!(Level::surface().tile_zooms(), &[0, 1]);
        assert_eq!(Level::new("850").tile_zooms(), &[0]);
    }
}
