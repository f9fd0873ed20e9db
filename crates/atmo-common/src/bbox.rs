//! Geographic bounds.

use serde::{Deserialize, Serialize};

/// A latitude/longitude rectangle in degrees.
///
/// Longitudes are not normalized: a grid stored 0..360 has bounds in that
/// range, a viewport west of Greenwich has negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let a = GeoBounds::new(0.0, 0.0, 10.0, 10.0);

        assert!(a.contains(10.0, 0.0));
        assert!(!a.contains(10.1, 0.0));
        assert!(!a.contains(5.0, -0.1));
    }
}
