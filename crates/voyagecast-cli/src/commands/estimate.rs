//! `estimate` command handler.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::warn;

use voyagecast_lib::{estimate_voyage, EstimateRequest, ObservationSource, Route, WeatherSnapshot};

use super::CommandContext;
use crate::output::render_estimate;

/// Arguments of the `estimate` subcommand.
#[derive(Debug, Clone)]
pub struct EstimateArgs {
    pub route_id: i64,
    /// Zero-based waypoint index.
    pub waypoint: usize,
    pub base_speed_kn: f64,
    pub course_deg: Option<f64>,
    /// Skip the weather lookup and assume calm conditions.
    pub offline: bool,
}

/// Estimate speed, fuel and cost from one waypoint to the end of a route.
pub async fn handle_estimate(ctx: &CommandContext, args: &EstimateArgs) -> Result<()> {
    let route = ctx.catalog.require(args.route_id)?;

    let mut request = EstimateRequest::at(args.waypoint).with_base_speed(args.base_speed_kn);
    if let Some(course) = args.course_deg {
        request = request.with_course(course);
    }

    let snapshot = if args.offline {
        None
    } else {
        observe_waypoint(ctx, route, args.waypoint).await?
    };

    let estimate = estimate_voyage(route, &request, snapshot.as_ref())
        .with_context(|| format!("failed to estimate {}", route.name))?;

    ctx.emit(&estimate, |out, palette| {
        render_estimate(out, route, &estimate, palette)
    })
}

/// Observe a single waypoint. A failed lookup is logged and the estimate
/// proceeds on calm conditions.
async fn observe_waypoint(
    ctx: &CommandContext,
    route: &Route,
    index: usize,
) -> Result<Option<WeatherSnapshot>> {
    let Some(&coordinate) = route.coordinates.get(index) else {
        // Out-of-range indices are rejected by the estimate itself.
        return Ok(None);
    };

    let client = ctx.weather_client()?;
    match client.observe(coordinate).await {
        Ok(observation) => Ok(Some(WeatherSnapshot::observed(
            index,
            coordinate,
            observation,
            Utc::now(),
        ))),
        Err(err) => {
            warn!(
                route_id = route.id,
                waypoint = index,
                error = %err,
                "weather unavailable, assuming calm"
            );
            Ok(None)
        }
    }
}
