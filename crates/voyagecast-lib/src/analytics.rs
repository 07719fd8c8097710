//! Route-wide voyage analytics from averaged weather.
//!
//! Unlike the per-waypoint models this works on route averages: one speed
//! and one fuel adjustment for the whole passage, with fuel counted in
//! tonnes per day.

use serde::{Deserialize, Serialize};

use crate::constants::{
    KM_PER_NAUTICAL_MILE, WAVE_HIGH_M, WAVE_MODERATE_M, WIND_HIGH_MPS, WIND_MODERATE_MPS,
};
use crate::error::{Error, Result};
use crate::geo::route_distance_km;
use crate::route::Route;
use crate::weather::WeatherSnapshot;

/// Wind speed assumed when no waypoint reported weather.
pub const DEFAULT_AVG_WIND_MPS: f64 = 10.0;
/// Wave height assumed when no waypoint reported weather.
pub const DEFAULT_AVG_WAVE_M: f64 = 1.5;
pub const BASE_FUEL_TONNES_PER_DAY: f64 = 175.0;
pub const FUEL_PRICE_USD_PER_TONNE: f64 = 650.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindCondition {
    High,
    Moderate,
    Favourable,
}

impl WindCondition {
    pub fn classify(avg_wind_mps: f64) -> Self {
        if avg_wind_mps > WIND_HIGH_MPS {
            WindCondition::High
        } else if avg_wind_mps > WIND_MODERATE_MPS {
            WindCondition::Moderate
        } else {
            WindCondition::Favourable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindCondition::High => "High winds",
            WindCondition::Moderate => "Moderate winds",
            WindCondition::Favourable => "Favorable winds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeaCondition {
    High,
    Moderate,
    Calm,
}

impl SeaCondition {
    pub fn classify(avg_wave_m: f64) -> Self {
        if avg_wave_m > WAVE_HIGH_M {
            SeaCondition::High
        } else if avg_wave_m > WAVE_MODERATE_M {
            SeaCondition::Moderate
        } else {
            SeaCondition::Calm
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeaCondition::High => "High waves",
            SeaCondition::Moderate => "Moderate waves",
            SeaCondition::Calm => "Calm seas",
        }
    }
}

/// Passage metrics for a whole route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAnalytics {
    pub route_id: i64,
    pub total_distance_km: f64,
    pub base_speed_kn: f64,
    pub adjusted_speed_kn: f64,
    pub speed_adjustment: f64,
    pub travel_time_hours: f64,
    pub travel_time_days: f64,
    pub base_fuel_tonnes_per_day: f64,
    pub fuel_adjustment: f64,
    pub total_fuel_tonnes: f64,
    pub fuel_cost_usd: f64,
    pub avg_wind_speed_mps: f64,
    pub avg_wave_height_m: f64,
    /// Waypoints whose weather contributed to the averages.
    pub observed_waypoints: usize,
    pub wind_condition: WindCondition,
    pub sea_condition: SeaCondition,
    pub recommendations: Vec<String>,
}

/// Compute passage analytics for `route` from its weather snapshots.
///
/// Averages use only observed snapshots; with none the defaults of 10 m/s
/// and 1.5 m stand in.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when `base_speed_kn` is not a finite
/// positive number.
pub fn route_analytics(
    route: &Route,
    snapshots: &[WeatherSnapshot],
    base_speed_kn: f64,
) -> Result<RouteAnalytics> {
    if !base_speed_kn.is_finite() || base_speed_kn <= 0.0 {
        return Err(Error::InvalidInput {
            message: format!("base speed must be finite and positive, got {base_speed_kn}"),
        });
    }

    let (wind_sum, wave_sum, observed) = snapshots
        .iter()
        .filter_map(WeatherSnapshot::conditions)
        .fold((0.0_f64, 0.0_f64, 0usize), |(wind, wave, n), c| {
            (wind + c.wind_speed_mps(), wave + c.wave_height_m(), n + 1)
        });
    let (avg_wind, avg_wave) = if observed > 0 {
        (wind_sum / observed as f64, wave_sum / observed as f64)
    } else {
        (DEFAULT_AVG_WIND_MPS, DEFAULT_AVG_WAVE_M)
    };

    let canal = route.style.is_canal();

    let mut speed_adjustment = 1.0;
    if avg_wind > WIND_HIGH_MPS {
        speed_adjustment *= 0.9;
    } else if avg_wind > WIND_MODERATE_MPS {
        speed_adjustment *= 0.95;
    }
    if avg_wave > WAVE_HIGH_M {
        speed_adjustment *= 0.8;
    } else if avg_wave > WAVE_MODERATE_M {
        speed_adjustment *= 0.9;
    }
    if canal {
        speed_adjustment *= 0.95;
    }

    let mut fuel_adjustment = 1.0;
    if avg_wind > WIND_HIGH_MPS {
        fuel_adjustment *= 1.15;
    }
    if avg_wave > WAVE_HIGH_M {
        fuel_adjustment *= 1.2;
    }
    if canal {
        fuel_adjustment *= 1.05;
    }

    let total_distance_km = route_distance_km(&route.coordinates);
    let adjusted_speed_kn = base_speed_kn * speed_adjustment;
    let travel_time_hours = total_distance_km / (adjusted_speed_kn * KM_PER_NAUTICAL_MILE);
    let travel_time_days = travel_time_hours / 24.0;
    let total_fuel_tonnes = BASE_FUEL_TONNES_PER_DAY * travel_time_days * fuel_adjustment;

    let mut analytics = RouteAnalytics {
        route_id: route.id,
        total_distance_km,
        base_speed_kn,
        adjusted_speed_kn,
        speed_adjustment,
        travel_time_hours,
        travel_time_days,
        base_fuel_tonnes_per_day: BASE_FUEL_TONNES_PER_DAY,
        fuel_adjustment,
        total_fuel_tonnes,
        fuel_cost_usd: total_fuel_tonnes * FUEL_PRICE_USD_PER_TONNE,
        avg_wind_speed_mps: avg_wind,
        avg_wave_height_m: avg_wave,
        observed_waypoints: observed,
        wind_condition: WindCondition::classify(avg_wind),
        sea_condition: SeaCondition::classify(avg_wave),
        recommendations: Vec::new(),
    };
    analytics.recommendations = analytics_recommendations(&analytics);
    Ok(analytics)
}

fn analytics_recommendations(a: &RouteAnalytics) -> Vec<String> {
    let mut notes = Vec::new();
    if a.avg_wind_speed_mps > WIND_HIGH_MPS {
        notes.push("Consider route adjustment for high winds".to_string());
    }
    if a.avg_wave_height_m > WAVE_HIGH_M {
        notes.push("Monitor wave conditions closely".to_string());
    }
    if a.fuel_adjustment > 1.1 {
        notes.push("Fuel consumption above normal - plan accordingly".to_string());
    }
    if a.speed_adjustment < 0.9 {
        notes.push("Speed reduced due to conditions - adjust schedule".to_string());
    }
    if notes.is_empty() {
        notes.push("Conditions favorable for optimal performance".to_string());
    }
    notes
}
