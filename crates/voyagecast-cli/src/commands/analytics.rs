//! `analytics` command handler.

use anyhow::Result;
use tracing::warn;

use voyagecast_lib::{route_analytics, Error as LibError, WeatherAggregator};

use super::CommandContext;
use crate::output::render_analytics;

/// Whole-route travel time, fuel and cost summary.
///
/// When no waypoint weather can be fetched the summary falls back to the
/// default wind and wave averages instead of failing.
pub async fn handle_analytics(
    ctx: &CommandContext,
    route_id: i64,
    base_speed_kn: f64,
    offline: bool,
) -> Result<()> {
    let route = ctx.catalog.require(route_id)?;

    let snapshots = if offline {
        Vec::new()
    } else {
        let aggregator = WeatherAggregator::from_source(ctx.weather_client()?);
        match aggregator
            .fetch_route_weather(route.id, &route.coordinates)
            .await
        {
            Ok(snapshots) => snapshots,
            Err(err @ LibError::WeatherUnavailable { .. }) => {
                warn!(route_id = route.id, error = %err, "using default weather averages");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        }
    };

    let analytics = route_analytics(route, &snapshots, base_speed_kn)?;

    ctx.emit(&analytics, |out, palette| {
        render_analytics(out, route, &analytics, palette)
    })
}
