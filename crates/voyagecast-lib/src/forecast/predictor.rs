use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ForecastDay, ForecastPredictor, ForecastRequest};
use crate::error::{Error, Result};

pub const DEFAULT_FORECAST_API_BASE: &str = "http://localhost:4000";
pub const FORECAST_PATH: &str = "/api/waypoint/forecast";

/// Temperature keys accepted in a predictor day entry, in priority order.
const TEMPERATURE_KEYS: [&str; 4] = ["temperature_c", "pred_temp", "temp", "predicted_temp"];

/// [`ForecastPredictor`] that POSTs to the forecast proxy service.
#[derive(Debug, Clone)]
pub struct HttpForecastPredictor {
    client: Client,
    base_url: String,
}

impl HttpForecastPredictor {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("voyagecast-lib/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, FORECAST_PATH)
    }
}

#[async_trait]
impl ForecastPredictor for HttpForecastPredictor {
    async fn predict(&self, request: &ForecastRequest) -> Result<Vec<ForecastDay>> {
        let url = self.endpoint();
        debug!(%url, waypoint_id = %request.waypoint_id, "requesting forecast");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Forecast {
                message: format!("Forecast fetch failed: {body}"),
            });
        }

        let payload: Value = serde_json::from_str(&body).map_err(|err| Error::Forecast {
            message: format!("Forecast response unreadable: {err}"),
        })?;
        parse_forecast(payload)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    forecast: Option<Vec<Value>>,
    #[serde(default)]
    predictions: Option<Vec<Value>>,
}

/// Interpret a predictor response body.
///
/// Days come from `forecast`, else `predictions`; a response with neither is
/// an empty forecast. A non-null `error` field fails the request.
fn parse_forecast(payload: Value) -> Result<Vec<ForecastDay>> {
    if !payload.is_object() {
        return Err(Error::Forecast {
            message: "No forecast result".to_string(),
        });
    }
    let response: ForecastResponse = serde_json::from_value(payload)?;

    match response.error {
        None | Some(Value::Null) => {}
        Some(Value::String(message)) => return Err(Error::Forecast { message }),
        Some(other) => {
            return Err(Error::Forecast {
                message: other.to_string(),
            })
        }
    }

    let entries = response
        .forecast
        .or(response.predictions)
        .unwrap_or_default();

    Ok(entries
        .iter()
        .enumerate()
        .map(|(position, entry)| parse_day(position, entry))
        .collect())
}

fn parse_day(position: usize, entry: &Value) -> ForecastDay {
    let number = |key: &str| entry.get(key).and_then(Value::as_f64);

    ForecastDay {
        day_index: entry
            .get("day_index")
            .and_then(Value::as_u64)
            .map_or(position, |d| d as usize),
        predicted_temperature_c: TEMPERATURE_KEYS.iter().find_map(|key| number(*key)),
        description: entry
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        precipitation_mm: number("precipitation_mm").or_else(|| number("precipitation")),
    }
}
