//! Voyagecast library entry points.
//!
//! This crate estimates a vessel's weather-affected performance along a
//! planned route: great-circle distance, a synthetic ocean state derived from
//! surface weather, adjusted speed over ground, fuel burn and voyage cost.
//! It also aggregates per-waypoint weather with partial-failure tolerance and
//! blends multi-day forecasts with the current observation. Higher-level
//! consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing the models.
//!

#![deny(warnings)]

pub mod analytics;
pub mod compass;
pub mod constants;
pub mod cost;
pub mod error;
pub mod estimate;
pub mod forecast;
pub mod fuel;
pub mod geo;
pub mod ocean;
pub mod route;
pub mod speed;
pub mod weather;

pub use analytics::{route_analytics, RouteAnalytics};
pub use compass::{direction_arrow, direction_name};
pub use cost::{cost_recommendations, estimate_cost, CostBreakdown, CostEstimate, CostRates};
pub use error::{Error, Result};
pub use estimate::{estimate_voyage, EstimateRequest, VoyageEstimate};
pub use forecast::{
    blend_forecast, day_label, fetch_blended_forecast, ForecastDay, ForecastPredictor,
    ForecastRequest, HttpForecastPredictor,
};
pub use fuel::{estimate_fuel, FuelEstimate, FuelParams};
pub use geo::{haversine_km, route_distance_km, segment_distances_km};
pub use ocean::{derive_ocean_state, AtmosphericObservation, OceanState};
pub use route::{Coordinate, LineStyle, Port, PortKind, Route, RouteCatalog, RouteSource};
pub use speed::{adjust_speed, Conditions, SpeedAdjustment};
pub use weather::{
    Generation, ObservationSource, OpenWeatherClient, Selection, SelectionTracker,
    WeatherAggregator, WeatherSnapshot,
};
