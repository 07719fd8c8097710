//! Multi-day forecasts blended with the current observation.
//!
//! The predictor is an external collaborator; this module only shapes its
//! output. The first day of a forecast is the day already observed, so the
//! observed temperature replaces the predicted one there.

mod predictor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::route::{predictor_waypoint_id, Coordinate};
use crate::weather::WeatherSnapshot;

pub use predictor::{HttpForecastPredictor, DEFAULT_FORECAST_API_BASE, FORECAST_PATH};

/// Longest forecast the engine returns.
pub const MAX_FORECAST_DAYS: usize = 10;

/// One day of a waypoint forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Zero-based day offset from today.
    pub day_index: usize,
    /// `None` when the predictor returned no temperature for the day.
    pub predicted_temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
}

impl ForecastDay {
    pub fn new(day_index: usize, predicted_temperature_c: f64) -> Self {
        Self {
            day_index,
            predicted_temperature_c: Some(predicted_temperature_c),
            description: None,
            precipitation_mm: None,
        }
    }
}

/// Display label for the forecast entry at `position`: `Day-1`, then
/// `Day2` through `Day10`.
pub fn day_label(position: usize) -> String {
    if position == 0 {
        "Day-1".to_string()
    } else {
        format!("Day{}", position + 1)
    }
}

/// Input handed to a [`ForecastPredictor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Predictor key, `"{route_id}-wp-{index}"`.
    pub waypoint_id: String,
    pub lat: f64,
    pub lon: f64,
    /// Opaque context forwarded to the model; an empty object when unused.
    #[serde(default = "empty_history")]
    pub history: serde_json::Value,
}

fn empty_history() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl ForecastRequest {
    pub fn for_waypoint(route_id: i64, index: usize, coordinate: Coordinate) -> Self {
        Self {
            waypoint_id: predictor_waypoint_id(route_id, index),
            lat: coordinate.lat,
            lon: coordinate.lon,
            history: empty_history(),
        }
    }

    pub fn with_history(mut self, history: serde_json::Value) -> Self {
        self.history = history;
        self
    }
}

/// Produces per-day temperature forecasts for a waypoint.
#[async_trait]
pub trait ForecastPredictor: Send + Sync {
    async fn predict(&self, request: &ForecastRequest) -> Result<Vec<ForecastDay>>;
}

/// Merge the current observation into the first forecast day.
///
/// Day 0 takes the observed air temperature whenever an observation exists,
/// and the observed description and precipitation only where the forecast
/// has none. Later days pass through untouched and the result holds at most
/// [`MAX_FORECAST_DAYS`] entries. A failed snapshot blends as no observation.
///
/// ```
/// use voyagecast_lib::forecast::{blend_forecast, ForecastDay};
///
/// let blended = blend_forecast(vec![ForecastDay::new(0, 18.0)], None);
/// assert_eq!(blended[0].predicted_temperature_c, Some(18.0));
/// ```
pub fn blend_forecast(
    mut forecast: Vec<ForecastDay>,
    observed: Option<&WeatherSnapshot>,
) -> Vec<ForecastDay> {
    forecast.truncate(MAX_FORECAST_DAYS);

    let observation = observed.and_then(WeatherSnapshot::observation);
    if let (Some(first), Some(obs)) = (forecast.first_mut(), observation) {
        first.predicted_temperature_c = Some(obs.air_temperature_c);
        if first.description.is_none() {
            first.description = obs.description.clone();
        }
        if first.precipitation_mm.is_none() {
            first.precipitation_mm = obs.precipitation_mm;
        }
    }

    forecast
}

/// Ask `predictor` for a waypoint forecast and blend in `observed`.
///
/// Predictor errors are returned as they are.
pub async fn fetch_blended_forecast(
    predictor: &dyn ForecastPredictor,
    route_id: i64,
    index: usize,
    coordinate: Coordinate,
    observed: Option<&WeatherSnapshot>,
) -> Result<Vec<ForecastDay>> {
    let request = ForecastRequest::for_waypoint(route_id, index, coordinate);
    let forecast = predictor.predict(&request).await?;
    debug!(
        waypoint_id = %request.waypoint_id,
        days = forecast.len(),
        observed = observed.is_some_and(WeatherSnapshot::is_observed),
        "blending forecast"
    );
    Ok(blend_forecast(forecast, observed))
}
