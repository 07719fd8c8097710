//! Output rendering for CLI commands.
//!
//! Every command produces a serializable report. `--format json` writes it
//! as pretty JSON; the default text format renders the views below.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use voyagecast_lib::analytics::RouteAnalytics;
use voyagecast_lib::compass::{direction_arrow, direction_name};
use voyagecast_lib::forecast::{day_label, ForecastDay};
use voyagecast_lib::{Route, VoyageEstimate, WeatherSnapshot};

use crate::terminal::{format_usd, format_with_separators, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write + ?Sized, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One line of the `routes` listing.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub id: i64,
    pub name: String,
    pub style: String,
    pub canal: bool,
    pub waypoints: usize,
    pub distance_km: f64,
}

/// Result of the `distance` command.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    pub route_id: i64,
    pub name: String,
    pub total_km: f64,
    pub total_nm: f64,
    pub legs_km: Vec<f64>,
}

/// Result of the `weather` command.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub route_id: i64,
    pub name: String,
    pub observed: usize,
    pub failed: usize,
    pub waypoints: Vec<WeatherSnapshot>,
}

/// Result of the `forecast` command.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub route_id: i64,
    pub waypoint_index: usize,
    pub waypoint_id: String,
    pub observed_temperature_c: Option<f64>,
    pub days: Vec<ForecastDay>,
}

pub fn render_routes<W: Write + ?Sized>(
    out: &mut W,
    routes: &[RouteSummary],
    palette: &ColorPalette,
) -> Result<()> {
    if routes.is_empty() {
        writeln!(out, "No routes available in catalog.")?;
        return Ok(());
    }

    writeln!(out, "Available routes ({}):", routes.len())?;
    writeln!(
        out,
        "{:>4}  {:<48} {:<7} {:>9} {:>14}",
        "ID", "Name", "Style", "Waypoints", "Distance (km)"
    )?;
    for route in routes {
        writeln!(
            out,
            "{:>4}  {}{:<48}{} {:<7} {:>9} {:>14}",
            route.id,
            palette.white_bold,
            route.name,
            palette.reset,
            route.style,
            route.waypoints,
            format_with_separators(route.distance_km.round() as u64)
        )?;
    }
    Ok(())
}

pub fn render_distance<W: Write + ?Sized>(
    out: &mut W,
    report: &DistanceReport,
    palette: &ColorPalette,
) -> Result<()> {
    writeln!(
        out,
        "{}{}{} (route {})",
        palette.white_bold, report.name, palette.reset, report.route_id
    )?;
    for (i, leg) in report.legs_km.iter().enumerate() {
        writeln!(
            out,
            "  {gray}leg {} -> {}{reset}  {:>10.1} km",
            i + 1,
            i + 2,
            leg,
            gray = palette.gray,
            reset = palette.reset
        )?;
    }
    writeln!(
        out,
        "Total: {:.1} km ({:.1} nm)",
        report.total_km, report.total_nm
    )?;
    Ok(())
}

pub fn render_weather<W: Write + ?Sized>(
    out: &mut W,
    report: &WeatherReport,
    palette: &ColorPalette,
) -> Result<()> {
    writeln!(
        out,
        "{}{}{}: {} of {} waypoints reporting",
        palette.white_bold,
        report.name,
        palette.reset,
        report.observed,
        report.observed + report.failed
    )?;

    for snapshot in &report.waypoints {
        let coord = snapshot.coordinates();
        write!(
            out,
            "Waypoint {:>2} [{:>7.2}, {:>8.2}]  ",
            snapshot.waypoint_index() + 1,
            coord.lat,
            coord.lon
        )?;

        match (snapshot.observation(), snapshot.ocean_state()) {
            (Some(obs), Some(ocean)) => {
                let wind_color = severity_color(palette, obs.wind_speed_mps, 10.0, 15.0);
                let wave_color = severity_color(palette, ocean.wave_height_m, 2.0, 3.0);
                writeln!(
                    out,
                    "{}{:.1}°C{}  wind {}{:.1} m/s{} {} {:<3}  waves {}{:.2} m{}  swell {:.2} m {} {:<3}  current {:.2} m/s {} {:<3}  speed {:.1} kn",
                    palette.cyan,
                    obs.air_temperature_c,
                    palette.reset,
                    wind_color,
                    obs.wind_speed_mps,
                    palette.reset,
                    direction_arrow(obs.wind_direction_deg),
                    direction_name(obs.wind_direction_deg),
                    wave_color,
                    ocean.wave_height_m,
                    palette.reset,
                    ocean.swell_height_m,
                    direction_arrow(ocean.swell_direction_deg),
                    direction_name(ocean.swell_direction_deg),
                    ocean.current_speed_mps,
                    direction_arrow(ocean.current_direction_deg),
                    direction_name(ocean.current_direction_deg),
                    ocean.achievable_speed_kn,
                )?;
                if let Some(description) = &obs.description {
                    writeln!(out, "              {}{}{}", palette.gray, description, palette.reset)?;
                }
            }
            _ => {
                writeln!(
                    out,
                    "{}{}{}",
                    palette.red,
                    snapshot.error().unwrap_or("Data unavailable"),
                    palette.reset
                )?;
            }
        }
    }
    Ok(())
}

pub fn render_estimate<W: Write + ?Sized>(
    out: &mut W,
    route: &Route,
    estimate: &VoyageEstimate,
    palette: &ColorPalette,
) -> Result<()> {
    let speed = &estimate.speed;
    let f = &speed.factors;
    let fuel = &estimate.fuel;
    let cost = &estimate.cost;

    writeln!(
        out,
        "{}{} - Waypoint {}{} of {}",
        palette.white_bold,
        route.name,
        estimate.waypoint_index + 1,
        palette.reset,
        estimate.total_waypoints
    )?;

    writeln!(out, "\nSpeed")?;
    writeln!(out, "  Base speed:          {:.1} kn", estimate.base_speed_kn)?;
    writeln!(
        out,
        "  Speed over ground:   {:.1} kn ({:+.1} kn)",
        speed.speed_over_ground_kn,
        speed.impact_kn(estimate.base_speed_kn)
    )?;
    writeln!(
        out,
        "  Course over ground:  {:.0}° {}",
        speed.course_over_ground_deg,
        direction_name(speed.course_over_ground_deg)
    )?;
    writeln!(
        out,
        "  Wind:     {:?} x{:.3}  ({:+.2} kn)",
        f.wind.regime, f.wind.multiplier, -f.wind.speed_impact_kn
    )?;
    writeln!(
        out,
        "  Waves:    {:.2} m x{:.3}  ({:+.2} kn)",
        f.waves.height_m, f.waves.multiplier, -f.waves.speed_loss_kn
    )?;
    writeln!(
        out,
        "  Swell:    {:.2} m       ({:+.2} kn)",
        f.swell.height_m, -f.swell.speed_loss_kn
    )?;
    writeln!(
        out,
        "  Current:  {:?} x{:.3}  ({:+.2} kn along course)",
        f.current.regime, f.current.multiplier, f.current.along_course_kn
    )?;
    writeln!(
        out,
        "  Added resistance {:.0} N, power {:.0} kW, fuel {:.1} kg/h",
        speed.total_resistance_n, speed.power_increase_kw, speed.fuel_increase_kg_per_hour
    )?;

    writeln!(out, "\nFuel")?;
    writeln!(
        out,
        "  Current rate:        {:.1} kg/h",
        fuel.current_rate_kg_per_hour
    )?;
    writeln!(out, "  Remaining:           {:.1} t", fuel.remaining_kg / 1000.0)?;
    writeln!(out, "  Total:               {:.1} t", fuel.total_kg / 1000.0)?;
    writeln!(
        out,
        "  Weather x{:.3}, speed factor {:.3}, resistance factor {:.3}",
        fuel.weather_multiplier, fuel.speed_factor, fuel.resistance_factor
    )?;

    writeln!(out, "\nCost")?;
    writeln!(out, "  Fuel:                {}", format_usd(cost.fuel_cost))?;
    writeln!(
        out,
        "  Operational:         {} ({:.0} hrs)",
        format_usd(cost.operational_cost),
        cost.remaining_hours
    )?;
    writeln!(out, "  Port fees:           {}", format_usd(cost.port_fees))?;
    writeln!(out, "  Canal fees:          {}", format_usd(cost.canal_fees))?;
    writeln!(
        out,
        "  Weather surcharge:   {}",
        format_usd(cost.breakdown.weather)
    )?;
    writeln!(
        out,
        "  {}Total:               {}{}",
        palette.white_bold,
        format_usd(cost.total_cost),
        palette.reset
    )?;

    render_recommendations(out, &estimate.recommendations, palette)
}

pub fn render_analytics<W: Write + ?Sized>(
    out: &mut W,
    route: &Route,
    analytics: &RouteAnalytics,
    palette: &ColorPalette,
) -> Result<()> {
    let a = analytics;
    writeln!(out, "{}{}{}", palette.white_bold, route.name, palette.reset)?;

    writeln!(out, "\nDistance & Speed")?;
    writeln!(
        out,
        "  Total distance:  {} km",
        format_with_separators(a.total_distance_km.round() as u64)
    )?;
    writeln!(out, "  Base speed:      {:.0} kn", a.base_speed_kn)?;
    writeln!(out, "  Adjusted speed:  {:.1} kn", a.adjusted_speed_kn)?;
    writeln!(out, "  Speed factor:    {:.0}%", a.speed_adjustment * 100.0)?;

    writeln!(out, "\nTravel Time")?;
    writeln!(out, "  Hours:           {:.1}", a.travel_time_hours)?;
    writeln!(out, "  Days:            {:.1}", a.travel_time_days)?;

    writeln!(out, "\nFuel")?;
    writeln!(
        out,
        "  Base:            {:.0} t/day",
        a.base_fuel_tonnes_per_day
    )?;
    writeln!(out, "  Fuel factor:     {:.0}%", a.fuel_adjustment * 100.0)?;
    writeln!(out, "  Total:           {:.1} t", a.total_fuel_tonnes)?;
    writeln!(out, "  Cost:            {}", format_usd(a.fuel_cost_usd))?;

    writeln!(out, "\nWeather")?;
    writeln!(
        out,
        "  Avg wind:        {:.1} m/s  {}",
        a.avg_wind_speed_mps,
        a.wind_condition.label()
    )?;
    writeln!(
        out,
        "  Avg waves:       {:.1} m    {}",
        a.avg_wave_height_m,
        a.sea_condition.label()
    )?;
    if a.observed_waypoints == 0 {
        writeln!(
            out,
            "  {}No waypoint weather; using default averages{}",
            palette.yellow, palette.reset
        )?;
    }

    render_recommendations(out, &a.recommendations, palette)
}

pub fn render_forecast<W: Write + ?Sized>(
    out: &mut W,
    report: &ForecastReport,
    palette: &ColorPalette,
) -> Result<()> {
    writeln!(
        out,
        "10-Day Forecast for Waypoint {}",
        report.waypoint_index + 1
    )?;
    if report.days.is_empty() {
        writeln!(out, "No forecast data")?;
        return Ok(());
    }

    for (position, day) in report.days.iter().enumerate() {
        let temp = day
            .predicted_temperature_c
            .map_or_else(|| "n/a".to_string(), |t| format!("{t:.1}°C"));
        write!(
            out,
            "  {:<6} {}{:>7}{}",
            day_label(position),
            palette.cyan,
            temp,
            palette.reset
        )?;
        if let Some(description) = &day.description {
            write!(out, "  {description}")?;
        }
        if let Some(precip) = day.precipitation_mm {
            write!(out, "  {precip:.1} mm")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_recommendations<W: Write + ?Sized>(
    out: &mut W,
    notes: &[String],
    palette: &ColorPalette,
) -> Result<()> {
    writeln!(out, "\nRecommendations")?;
    for note in notes {
        writeln!(out, "  {}•{} {}", palette.yellow, palette.reset, note)?;
    }
    Ok(())
}

fn severity_color(palette: &ColorPalette, value: f64, moderate: f64, high: f64) -> &'static str {
    if value > high {
        palette.red
    } else if value > moderate {
        palette.yellow
    } else {
        palette.green
    }
}
