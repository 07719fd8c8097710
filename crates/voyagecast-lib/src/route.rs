//! Route records and the read-only route catalog.
//!
//! Routes are owned by an external catalog. The engine only reads them, so
//! this module exposes the [`RouteSource`] seam plus [`RouteCatalog`], a
//! JSON-file implementation used by the CLI and tests.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic coordinate in decimal degrees.
///
/// Serialized as a `[lat, lon]` pair to match the catalog format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.lat, value.lon]
    }
}

/// Line style of a route on the map. `Dashed` marks a canal transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn is_canal(self) -> bool {
        matches!(self, LineStyle::Dashed)
    }
}

/// Port classification; only major ports attract port fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Major,
    Minor,
}

/// A port call along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PortKind,
    /// Waypoint the call happens at. When absent, the port's position in the
    /// route's port list stands in for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoint_index: Option<usize>,
}

/// A planned voyage: ordered waypoints plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub style: LineStyle,
    pub coordinates: Vec<Coordinate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
}

impl Route {
    /// Check the catalog contract: a name, at least two waypoints, and
    /// coordinates inside the valid lat/lon ranges.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRoute {
                message: format!("route {} has an empty name", self.id),
            });
        }
        if self.coordinates.len() < 2 {
            return Err(Error::InvalidRoute {
                message: format!(
                    "route {} needs at least 2 waypoints, got {}",
                    self.id,
                    self.coordinates.len()
                ),
            });
        }
        if let Some((index, coord)) = self
            .coordinates
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_valid())
        {
            return Err(Error::InvalidRoute {
                message: format!(
                    "route {} waypoint {} is out of range: [{}, {}]",
                    self.id, index, coord.lat, coord.lon
                ),
            });
        }
        if let Some(port) = self.ports.iter().find(|p| {
            p.waypoint_index
                .is_some_and(|idx| idx >= self.coordinates.len())
        }) {
            return Err(Error::InvalidRoute {
                message: format!(
                    "route {} port '{}' references a waypoint past the end of the route",
                    self.id, port.name
                ),
            });
        }
        Ok(())
    }

    pub fn waypoint_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Number of major ports still ahead of `current_index`.
    pub fn major_ports_after(&self, current_index: usize) -> usize {
        self.ports
            .iter()
            .enumerate()
            .filter(|(position, port)| {
                let at = port.waypoint_index.unwrap_or(*position);
                at > current_index && port.kind == PortKind::Major
            })
            .count()
    }

    /// Key used by display surfaces for one waypoint, e.g. `3-waypoint-0`.
    pub fn waypoint_key(&self, index: usize) -> String {
        waypoint_key(self.id, index)
    }
}

/// Display key for a waypoint of a route.
pub fn waypoint_key(route_id: i64, index: usize) -> String {
    format!("{route_id}-waypoint-{index}")
}

/// Identifier the forecast predictor expects for a waypoint, e.g. `3-wp-0`.
pub fn predictor_waypoint_id(route_id: i64, index: usize) -> String {
    format!("{route_id}-wp-{index}")
}

/// Read-only lookup of routes owned by an external catalog.
pub trait RouteSource: Send + Sync {
    fn route(&self, id: i64) -> Option<Route>;
    fn routes(&self) -> Vec<Route>;
}

/// Collection of routes loaded from a JSON array.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: BTreeMap<i64, Route>,
    source: Option<PathBuf>,
}

impl RouteCatalog {
    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog from any reader yielding a JSON array of routes.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let parsed: Vec<Route> = serde_json::from_reader(reader)?;
        Self::from_routes(parsed)
    }

    /// Build a catalog from already-parsed routes, validating each one.
    pub fn from_routes(parsed: Vec<Route>) -> Result<Self> {
        let mut routes = BTreeMap::new();
        for route in parsed {
            route.validate()?;
            let id = route.id;
            if routes.insert(id, route).is_some() {
                return Err(Error::InvalidRoute {
                    message: format!("duplicate route id {id}"),
                });
            }
        }
        tracing::debug!(count = routes.len(), "route catalog loaded");
        Ok(Self {
            routes,
            source: None,
        })
    }

    /// Look up a route, turning a miss into [`Error::UnknownRoute`].
    pub fn require(&self, id: i64) -> Result<&Route> {
        self.routes.get(&id).ok_or_else(|| Error::UnknownRoute {
            id,
            known: self.routes.keys().copied().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl RouteSource for RouteCatalog {
    fn route(&self, id: i64) -> Option<Route> {
        self.routes.get(&id).cloned()
    }

    fn routes(&self) -> Vec<Route> {
        self.routes.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"[
        {"id": 2, "name": "Suez", "color": "#ff0000", "style": "dashed",
         "coordinates": [[31.2, 29.9], [30.0, 32.5], [12.6, 43.3]],
         "ports": [{"name": "Alexandria", "type": "major"},
                   {"name": "Port Said", "type": "minor"},
                   {"name": "Djibouti", "type": "major", "waypoint_index": 2}]},
        {"id": 1, "name": "Cape", "coordinates": [[31.2, 29.9], [-34.3, 18.4]]}
    ]"##;

    #[test]
    fn loads_routes_sorted_by_id() {
        let catalog = RouteCatalog::from_reader(SAMPLE.as_bytes()).expect("valid catalog");
        let ids: Vec<i64> = catalog.routes().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let cape = catalog.route(1).expect("cape present");
        assert_eq!(cape.style, LineStyle::Solid);
        assert!(cape.ports.is_empty());
        assert_eq!(cape.coordinates[1], Coordinate::new(-34.3, 18.4));
    }

    #[test]
    fn counts_major_ports_ahead_of_position() {
        let catalog = RouteCatalog::from_reader(SAMPLE.as_bytes()).unwrap();
        let suez = catalog.require(2).unwrap();
        assert!(suez.style.is_canal());
        // Alexandria sits at list position 0, Djibouti at waypoint 2.
        assert_eq!(suez.major_ports_after(0), 1);
        assert_eq!(suez.major_ports_after(1), 1);
        assert_eq!(suez.major_ports_after(2), 0);
    }

    #[test]
    fn rejects_single_waypoint_route() {
        let json = r#"[{"id": 1, "name": "Stub", "coordinates": [[0.0, 0.0]]}]"#;
        let err = RouteCatalog::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidRoute { .. }));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let json = r#"[{"id": 1, "name": "Bad", "coordinates": [[0.0, 0.0], [95.0, 10.0]]}]"#;
        let err = RouteCatalog::from_reader(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("waypoint 1"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[
            {"id": 1, "name": "A", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
            {"id": 1, "name": "B", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
        ]"#;
        let err = RouteCatalog::from_reader(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate route id 1"));
    }

    #[test]
    fn unknown_route_reports_known_ids() {
        let catalog = RouteCatalog::from_reader(SAMPLE.as_bytes()).unwrap();
        let err = catalog.require(7).unwrap_err();
        assert_eq!(err.to_string(), "unknown route id: 7. Known routes: 1, 2");
    }

    #[test]
    fn waypoint_keys_follow_display_and_predictor_formats() {
        assert_eq!(waypoint_key(3, 0), "3-waypoint-0");
        assert_eq!(predictor_waypoint_id(3, 4), "3-wp-4");
    }
}
