//! `forecast` command handler.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;

use voyagecast_lib::route::predictor_waypoint_id;
use voyagecast_lib::{
    fetch_blended_forecast, Error as LibError, ObservationSource, WeatherSnapshot,
};

use super::CommandContext;
use crate::output::{render_forecast, ForecastReport};

/// Ten-day forecast for one waypoint, with day one taken from the current
/// observation when there is one.
pub async fn handle_forecast(ctx: &CommandContext, route_id: i64, waypoint: usize) -> Result<()> {
    let route = ctx.catalog.require(route_id)?;
    let coordinate = *route
        .coordinates
        .get(waypoint)
        .ok_or_else(|| LibError::InvalidInput {
            message: format!(
                "waypoint {} is outside route {} ({} waypoints)",
                waypoint,
                route.id,
                route.waypoint_count()
            ),
        })?;

    let client = ctx.weather_client()?;
    let observed = match client.observe(coordinate).await {
        Ok(observation) => Some(WeatherSnapshot::observed(
            waypoint,
            coordinate,
            observation,
            Utc::now(),
        )),
        Err(err) => {
            debug!(route_id, waypoint, error = %err, "forecast without observation");
            None
        }
    };

    let predictor = ctx.forecast_predictor()?;
    let days = fetch_blended_forecast(
        &predictor,
        route.id,
        waypoint,
        coordinate,
        observed.as_ref(),
    )
    .await
    .with_context(|| format!("failed to fetch forecast for waypoint {}", waypoint + 1))?;

    let report = ForecastReport {
        route_id: route.id,
        waypoint_index: waypoint,
        waypoint_id: predictor_waypoint_id(route.id, waypoint),
        observed_temperature_c: observed
            .as_ref()
            .and_then(WeatherSnapshot::observation)
            .map(|obs| obs.air_temperature_c),
        days,
    };

    ctx.emit(&report, |out, palette| render_forecast(out, &report, palette))
}
