//! Compass names and arrows for bearings.

const POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];

fn sector(degrees: f64, sectors: usize) -> usize {
    if !degrees.is_finite() {
        return 0;
    }
    let width = 360.0 / sectors as f64;
    (degrees.rem_euclid(360.0) / width).round() as usize % sectors
}

/// Nearest of the 16 compass points, e.g. `NNE` for 20°.
pub fn direction_name(degrees: f64) -> &'static str {
    POINTS[sector(degrees, POINTS.len())]
}

/// Nearest of eight arrows pointing along the bearing.
pub fn direction_arrow(degrees: f64) -> char {
    ARROWS[sector(degrees, ARROWS.len())]
}
