//! Great-circle geometry over route waypoints.

use crate::constants::EARTH_RADIUS_KM;
use crate::route::Coordinate;

/// Haversine distance between two coordinates in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Distance of each leg between consecutive waypoints.
pub fn segment_distances_km(coordinates: &[Coordinate]) -> Vec<f64> {
    coordinates
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .collect()
}

/// Total route distance: the sum of every leg in travel order.
///
/// Fewer than two coordinates yields zero.
pub fn route_distance_km(coordinates: &[Coordinate]) -> f64 {
    segment_distances_km(coordinates).iter().sum()
}

/// Initial great-circle bearing from `from` towards `to`, in degrees [0, 360).
pub fn initial_bearing_deg(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Course the vessel steers when leaving waypoint `index`.
///
/// The last waypoint keeps the course of the leg that arrived there.
pub fn course_at(coordinates: &[Coordinate], index: usize) -> Option<f64> {
    if coordinates.len() < 2 {
        return None;
    }
    let from = index.min(coordinates.len() - 2);
    Some(initial_bearing_deg(coordinates[from], coordinates[from + 1]))
}
