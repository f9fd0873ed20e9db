//! Common test fixtures for overlay tests.

/// Grid placements used across the test suite.
pub mod grid {
    /// Placement of a regular lat/lng grid (north-west origin, rows run south).
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GridFixture {
        pub lat0: f64,
        pub lng0: f64,
        pub d_lat: f64,
        pub d_lng: f64,
        pub nx: usize,
        pub ny: usize,
    }

    impl GridFixture {
        pub fn size(&self) -> usize {
            self.nx * self.ny
        }

        /// (south, west, north, east) of the grid points.
        pub fn bounds(&self) -> (f64, f64, f64, f64) {
            (
                self.lat0 - self.d_lat * (self.ny - 1) as f64,
                self.lng0,
                self.lat0,
                self.lng0 + self.d_lng * (self.nx - 1) as f64,
            )
        }

        /// A point well inside the grid.
        pub fn center(&self) -> (f64, f64) {
            let (south, west, north, east) = self.bounds();
            ((south + north) / 2.0, (west + east) / 2.0)
        }
    }

    /// Regional 0.5 degree grid over Japan, 50N..20N, 120E..150E.
    pub const JAPAN_0P5: GridFixture = GridFixture {
        lat0: 50.0,
        lng0: 120.0,
        d_lat: 0.5,
        d_lng: 0.5,
        nx: 61,
        ny: 61,
    };

    /// Global 1 degree grid stored 0..359E, 90N..90S.
    pub const GLOBAL_1P0: GridFixture = GridFixture {
        lat0: 90.0,
        lng0: 0.0,
        d_lat: 1.0,
        d_lng: 1.0,
        nx: 360,
        ny: 181,
    };

    /// Tiny 4x4 grid for hand-checked interpolation.
    pub const SIMPLE_4X4: GridFixture = GridFixture {
        lat0: 40.0,
        lng0: 130.0,
        d_lat: 1.0,
        d_lng: 1.0,
        nx: 4,
        ny: 4,
    };
}

/// Time fixtures in the compact tile format.
pub mod time {
    pub const COVERAGE_START: &str = "202401010000";
    pub const COVERAGE_END: &str = "202401020000";
    pub const AFTER_COVERAGE: &str = "202401030000";
}

/// Tile metadata documents.
pub mod tiles {
    /// A metadata document with a surface level and one upper level.
    pub const TILE_JSON: &str = r#"{
        "url": "http://tiles.example.com/{valid_time}/{level}/{e}.bin",
        "surface": { "valid_time": ["202401010000", "202401011200", "202401020000"] },
        "850": { "valid_time": ["202401010000", "202401020000"] }
    }"#;
}

/// Views used by rasterization tests: (center lat, center lng, zoom).
pub mod views {
    /// Tokyo at a regional zoom, fully inside [`super::grid::JAPAN_0P5`].
    pub const TOKYO: (f64, f64, f64) = (35.68, 139.69, 6.0);

    /// Mid-Atlantic, outside every regional fixture.
    pub const ATLANTIC: (f64, f64, f64) = (30.0, -40.0, 5.0);
}
