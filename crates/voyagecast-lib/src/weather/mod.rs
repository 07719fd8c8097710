//! Per-waypoint weather aggregation.
//!
//! [`WeatherAggregator`] asks an [`ObservationSource`] for every waypoint of
//! a route at once. Individual failures are kept as
//! [`WeatherSnapshot::Failed`] entries so one bad waypoint never sinks the
//! batch; only a batch in which nothing succeeded is an error.

mod openweather;
mod selection;
mod snapshot;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ocean::AtmosphericObservation;
use crate::route::Coordinate;

pub use openweather::{OpenWeatherClient, DEFAULT_OPENWEATHER_BASE_URL, MISSING_API_KEY_MESSAGE};
pub use selection::{Generation, Selection, SelectionTracker};
pub use snapshot::{unavailable_message, WeatherSnapshot, ERROR_MESSAGE_LIMIT};

/// Supplies the current surface weather at a coordinate.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn observe(&self, coordinate: Coordinate) -> Result<AtmosphericObservation>;
}

#[async_trait]
impl<T: ObservationSource + ?Sized> ObservationSource for Arc<T> {
    async fn observe(&self, coordinate: Coordinate) -> Result<AtmosphericObservation> {
        (**self).observe(coordinate).await
    }
}

/// Fans out observation requests for a route and collects the snapshots.
#[derive(Clone)]
pub struct WeatherAggregator {
    source: Arc<dyn ObservationSource>,
}

impl WeatherAggregator {
    pub fn new(source: Arc<dyn ObservationSource>) -> Self {
        Self { source }
    }

    pub fn from_source<S: ObservationSource + 'static>(source: S) -> Self {
        Self::new(Arc::new(source))
    }

    /// Fetch weather for every waypoint concurrently.
    ///
    /// The returned snapshots are in waypoint order whatever order the
    /// requests complete in.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for an empty waypoint list and
    /// [`Error::WeatherUnavailable`] when no waypoint produced an observation.
    pub async fn fetch_route_weather(
        &self,
        route_id: i64,
        waypoints: &[Coordinate],
    ) -> Result<Vec<WeatherSnapshot>> {
        if waypoints.is_empty() {
            return Err(Error::InvalidInput {
                message: format!("route {route_id} has no waypoints to fetch weather for"),
            });
        }

        let requests = waypoints
            .iter()
            .enumerate()
            .map(|(index, &coordinate)| self.fetch_waypoint(route_id, index, coordinate));
        let snapshots = join_all(requests).await;

        let observed = snapshots.iter().filter(|s| s.is_observed()).count();
        if observed == 0 {
            return Err(Error::WeatherUnavailable {
                route_id,
                attempted: waypoints.len(),
            });
        }

        debug!(
            route_id,
            observed,
            failed = snapshots.len() - observed,
            "aggregated route weather"
        );
        Ok(snapshots)
    }

    /// Fetch route weather on behalf of a selection, discarding the result
    /// if a newer selection started meanwhile.
    pub async fn fetch_for_selection(
        &self,
        tracker: &SelectionTracker,
        generation: Generation,
        route_id: i64,
        waypoints: &[Coordinate],
    ) -> Result<Selection<Vec<WeatherSnapshot>>> {
        let result = self.fetch_route_weather(route_id, waypoints).await;
        if !tracker.is_current(generation) {
            debug!(
                route_id,
                generation = generation.value(),
                "discarding weather for superseded selection"
            );
            return Ok(Selection::Stale);
        }
        result.map(Selection::Current)
    }

    async fn fetch_waypoint(
        &self,
        route_id: i64,
        index: usize,
        coordinate: Coordinate,
    ) -> WeatherSnapshot {
        match self.source.observe(coordinate).await {
            Ok(observation) => {
                WeatherSnapshot::observed(index, coordinate, observation, Utc::now())
            }
            Err(err) => {
                warn!(
                    route_id,
                    waypoint = index,
                    error = %err,
                    "weather retrieval failed"
                );
                WeatherSnapshot::failed(index, coordinate, &err.to_string(), Utc::now())
            }
        }
    }
}
