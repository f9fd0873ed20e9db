//! Test data generators for creating synthetic weather-like grids.
//!
//! All grids are row-major with row 0 at the northern edge, matching the
//! storage order of decoded tiles.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 1000.0); // col=1, row=0
/// assert_eq!(grid[10], 1.0);   // col=0, row=1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a temperature grid in Kelvin.
///
/// Cold in the north, warm in the south: 250K on row 0 rising to 310K on
/// the last row, with a small west-east ripple.
pub fn create_temperature_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let y_factor = row as f32 / height.saturating_sub(1).max(1) as f32;
            let x_factor = col as f32 / width.max(1) as f32;
            let ripple = (x_factor * std::f32::consts::TAU).sin() * 2.0;
            data.push(250.0 + y_factor * 60.0 + ripple);
        }
    }
    data
}

/// Creates a mean-sea-level pressure grid in Pa.
///
/// A single low centred in the grid: ~980 hPa in the middle rising to
/// ~1030 hPa at the corners.
pub fn create_pressure_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let max_dist = ((center_x * center_x) + (center_y * center_y)).sqrt().max(1.0);

    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - center_x;
            let dy = row as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(98000.0 + (dist / max_dist) * 5000.0);
        }
    }
    data
}

/// Creates a U-component wind grid (west-east component) in m/s.
///
/// Varies by row, simulating a jet: -20 m/s in the north to +20 m/s in the
/// south.
pub fn create_u_wind_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let lat_factor = (row as f32 / height.max(1) as f32 - 0.5) * 2.0;
        for _col in 0..width {
            data.push(lat_factor * 20.0);
        }
    }
    data
}

/// Creates a V-component wind grid (south-north component) in m/s.
pub fn create_v_wind_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            let lon_factor = (col as f32 / width.max(1) as f32 * std::f32::consts::PI * 2.0).sin();
            data.push(lon_factor * 10.0);
        }
    }
    data
}

/// Creates a deterministic precipitation grid in mm/h.
///
/// About a third of the cells are dry (0.0); the rest range up to 40 mm/h.
pub fn create_precipitation_grid(width: usize, height: usize, seed: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            let value = if hash % 3 == 0 {
                0.0
            } else {
                (hash % 4000) as f32 / 100.0
            };
            data.push(value);
        }
    }
    data
}

/// Creates a cloud cover grid in percent (0..=100), a west-east ramp.
pub fn create_cloud_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(col as f32 / width.saturating_sub(1).max(1) as f32 * 100.0);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Replaces the cells of a rectangular block with NaN (NoData).
///
/// `cols` and `rows` are half-open ranges; out-of-grid parts are ignored.
pub fn punch_nodata(
    data: &mut [f32],
    width: usize,
    cols: std::ops::Range<usize>,
    rows: std::ops::Range<usize>,
) {
    let height = data.len() / width.max(1);
    for row in rows.start..rows.end.min(height) {
        for col in cols.start..cols.end.min(width) {
            data[row * width + col] = f32::NAN;
        }
    }
}
