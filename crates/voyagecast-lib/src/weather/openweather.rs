use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::ObservationSource;
use crate::error::{Error, Result};
use crate::ocean::AtmosphericObservation;
use crate::route::Coordinate;

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const MISSING_API_KEY_MESSAGE: &str = "API Key is missing. Cannot fetch real-time data.";

/// Air temperature assumed when the response omits `main.temp`.
const FALLBACK_AIR_TEMPERATURE_C: f64 = 20.0;

/// [`ObservationSource`] backed by the OpenWeatherMap current weather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Create a client. A missing or blank `api_key` is accepted here but
    /// makes every [`observe`](ObservationSource::observe) call fail.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn user_agent() -> String {
    format!("voyagecast-lib/{}", env!("CARGO_PKG_VERSION"))
}

#[async_trait]
impl ObservationSource for OpenWeatherClient {
    async fn observe(&self, coordinate: Coordinate) -> Result<AtmosphericObservation> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Error::Observation {
                message: MISSING_API_KEY_MESSAGE.to_string(),
            });
        };

        let url = format!("{}/weather", self.base_url);
        debug!(lat = coordinate.lat, lon = coordinate.lon, "requesting current weather");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), %body, "weather request rejected");
            return Err(Error::Observation {
                message: format!("OpenWeather API failed: Status {}", status.as_u16()),
            });
        }

        let payload = response.json::<CurrentWeatherResponse>().await?;
        Ok(payload.into_observation())
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    wind: Option<WindSection>,
    #[serde(default)]
    main: Option<MainSection>,
    #[serde(default)]
    visibility: Option<f64>,
    #[serde(default)]
    rain: Option<RainSection>,
    #[serde(default)]
    weather: Vec<ConditionSection>,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    #[serde(default)]
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RainSection {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    #[serde(default)]
    description: Option<String>,
}

impl CurrentWeatherResponse {
    fn into_observation(self) -> AtmosphericObservation {
        let wind_speed = self.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0);
        let wind_dir = self.wind.as_ref().and_then(|w| w.deg).unwrap_or(0.0);
        let temp = self
            .main
            .and_then(|m| m.temp)
            .unwrap_or(FALLBACK_AIR_TEMPERATURE_C);

        AtmosphericObservation {
            wind_speed_mps: wind_speed,
            wind_direction_deg: wind_dir,
            air_temperature_c: temp,
            // Zero visibility is treated as unreported.
            visibility_m: self.visibility.filter(|v| *v > 0.0),
            precipitation_mm: self.rain.and_then(|r| r.one_hour),
            description: self.weather.into_iter().find_map(|w| w.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let json = r#"{
            "wind": {"speed": 7.5, "deg": 220},
            "main": {"temp": 18.2},
            "visibility": 8000,
            "rain": {"1h": 0.6},
            "weather": [{"description": "light rain"}]
        }"#;
        let obs = serde_json::from_str::<CurrentWeatherResponse>(json)
            .unwrap()
            .into_observation();
        assert_eq!(obs.wind_speed_mps, 7.5);
        assert_eq!(obs.wind_direction_deg, 220.0);
        assert_eq!(obs.air_temperature_c, 18.2);
        assert_eq!(obs.visibility_m, Some(8000.0));
        assert_eq!(obs.precipitation_mm, Some(0.6));
        assert_eq!(obs.description.as_deref(), Some("light rain"));
    }

    #[test]
    fn sparse_payload_uses_fallbacks() {
        let obs = serde_json::from_str::<CurrentWeatherResponse>("{}")
            .unwrap()
            .into_observation();
        assert_eq!(obs.wind_speed_mps, 0.0);
        assert_eq!(obs.air_temperature_c, 20.0);
        assert_eq!(obs.visibility_m, None);
        assert_eq!(obs.visibility_km(), 10.0);
    }

    #[tokio::test]
    async fn missing_key_fails_every_call() {
        let client =
            OpenWeatherClient::new("http://127.0.0.1:9", Some("  ".into()), Duration::from_secs(1))
                .unwrap();
        assert!(!client.has_api_key());
        let err = client.observe(Coordinate::new(0.0, 0.0)).await.unwrap_err();
        assert_eq!(err.to_string(), MISSING_API_KEY_MESSAGE);
    }
}
