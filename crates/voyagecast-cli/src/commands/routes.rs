//! `routes` and `distance` command handlers.

use anyhow::Result;

use voyagecast_lib::constants::KM_PER_NAUTICAL_MILE;
use voyagecast_lib::{route_distance_km, segment_distances_km, LineStyle, RouteSource};

use super::CommandContext;
use crate::output::{render_distance, render_routes, DistanceReport, RouteSummary};

/// List every route in the catalog with its great-circle length.
pub fn handle_list_routes(ctx: &CommandContext) -> Result<()> {
    let summaries: Vec<RouteSummary> = ctx
        .catalog
        .routes()
        .into_iter()
        .map(|route| RouteSummary {
            id: route.id,
            style: style_name(route.style).to_string(),
            canal: route.style.is_canal(),
            waypoints: route.waypoint_count(),
            distance_km: route_distance_km(&route.coordinates),
            name: route.name,
        })
        .collect();

    ctx.emit(&summaries, |out, palette| {
        render_routes(out, &summaries, palette)
    })
}

/// Report total and per-leg distance for one route.
pub fn handle_distance(ctx: &CommandContext, route_id: i64) -> Result<()> {
    let route = ctx.catalog.require(route_id)?;
    let total_km = route_distance_km(&route.coordinates);
    let report = DistanceReport {
        route_id: route.id,
        name: route.name.clone(),
        total_km,
        total_nm: total_km / KM_PER_NAUTICAL_MILE,
        legs_km: segment_distances_km(&route.coordinates),
    };

    ctx.emit(&report, |out, palette| render_distance(out, &report, palette))
}

fn style_name(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "solid",
        LineStyle::Dashed => "dashed",
    }
}
