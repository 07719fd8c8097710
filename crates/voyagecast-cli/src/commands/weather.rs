//! `weather` command handler.

use anyhow::{Context, Result};

use voyagecast_lib::WeatherAggregator;

use super::CommandContext;
use crate::output::{render_weather, WeatherReport};

/// Fetch and show weather for every waypoint of a route.
///
/// Failed waypoints are listed inline; the command only fails when no
/// waypoint produced an observation.
pub async fn handle_weather(ctx: &CommandContext, route_id: i64) -> Result<()> {
    let route = ctx.catalog.require(route_id)?;
    let aggregator = WeatherAggregator::from_source(ctx.weather_client()?);

    let snapshots = aggregator
        .fetch_route_weather(route.id, &route.coordinates)
        .await
        .with_context(|| format!("failed to fetch weather for {}", route.name))?;

    let observed = snapshots.iter().filter(|s| s.is_observed()).count();
    let report = WeatherReport {
        route_id: route.id,
        name: route.name.clone(),
        observed,
        failed: snapshots.len() - observed,
        waypoints: snapshots,
    };

    ctx.emit(&report, |out, palette| render_weather(out, &report, palette))
}
