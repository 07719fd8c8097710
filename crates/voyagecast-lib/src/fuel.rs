//! Fuel consumption for the remainder of a route.
//!
//! Consumption at the current waypoint scales the engine's design rate by the
//! speed ratio, the added resistance, and a weather surcharge; the remaining
//! route is then projected at that rate for the scheduled sailing hours.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_FUEL_RATE_KG_PER_HOUR, HOURS_PER_WAYPOINT, WAVE_HIGH_M, WAVE_MODERATE_M, WIND_HIGH_MPS,
    WIND_MODERATE_MPS,
};
use crate::error::{Error, Result};
use crate::speed::Conditions;
use crate::weather::WeatherSnapshot;

/// Fuel model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelParams {
    /// Consumption at the base speed in calm water (kg/h).
    pub base_rate_kg_per_hour: f64,
    /// Scheduled sailing time per remaining waypoint.
    pub hours_per_waypoint: f64,
}

impl Default for FuelParams {
    fn default() -> Self {
        Self {
            base_rate_kg_per_hour: BASE_FUEL_RATE_KG_PER_HOUR,
            hours_per_waypoint: HOURS_PER_WAYPOINT,
        }
    }
}

/// Fuel figures at one waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelEstimate {
    pub current_rate_kg_per_hour: f64,
    pub remaining_kg: f64,
    pub total_kg: f64,
    pub weather_multiplier: f64,
    pub speed_factor: f64,
    pub resistance_factor: f64,
}

/// Consumption surcharge for wind and sea state.
///
/// Wind above 15 m/s adds 20% (above 10 m/s, 10%); waves above 3 m add 25%
/// (above 2 m, 15%). The two surcharges compound.
pub fn weather_fuel_multiplier(conditions: Option<Conditions<'_>>) -> f64 {
    let Some(conditions) = conditions else {
        return 1.0;
    };

    let wind = conditions.wind_speed_mps();
    let wave = conditions.wave_height_m();
    let mut multiplier = 1.0;

    if wind > WIND_HIGH_MPS {
        multiplier *= 1.2;
    } else if wind > WIND_MODERATE_MPS {
        multiplier *= 1.1;
    }

    if wave > WAVE_HIGH_M {
        multiplier *= 1.25;
    } else if wave > WAVE_MODERATE_M {
        multiplier *= 1.15;
    }

    multiplier
}

/// Estimate fuel with the default [`FuelParams`].
pub fn estimate_fuel(
    speed_over_ground_kn: f64,
    base_speed_kn: f64,
    current_index: usize,
    total_waypoints: usize,
    weather: Option<&WeatherSnapshot>,
) -> Result<FuelEstimate> {
    estimate_fuel_with(
        &FuelParams::default(),
        speed_over_ground_kn,
        base_speed_kn,
        current_index,
        total_waypoints,
        weather,
    )
}

/// Estimate fuel for the rest of the route from `current_index`.
///
/// ```text
/// speed_factor      = max(0.5, sog / base)
/// resistance_factor = 1 + |sog − base| / base × 0.5
/// current_rate      = base_rate × resistance_factor × weather / speed_factor
/// remaining         = current_rate × (total − current) × hours_per_waypoint
/// total             = current_rate + remaining
/// ```
///
/// Once `current_index` reaches `total_waypoints` nothing remains and the
/// total is the current rate alone. Failed snapshots count as no weather.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the base speed is not a finite
/// positive number or the speed over ground is not finite.
pub fn estimate_fuel_with(
    params: &FuelParams,
    speed_over_ground_kn: f64,
    base_speed_kn: f64,
    current_index: usize,
    total_waypoints: usize,
    weather: Option<&WeatherSnapshot>,
) -> Result<FuelEstimate> {
    if !base_speed_kn.is_finite() || base_speed_kn <= 0.0 {
        return Err(Error::InvalidInput {
            message: format!("base speed must be finite and positive, got {base_speed_kn}"),
        });
    }
    if !speed_over_ground_kn.is_finite() {
        return Err(Error::InvalidInput {
            message: format!("speed over ground must be finite, got {speed_over_ground_kn}"),
        });
    }

    let speed_factor = (speed_over_ground_kn / base_speed_kn).max(0.5);
    let resistance_factor =
        1.0 + ((speed_over_ground_kn - base_speed_kn).abs() / base_speed_kn) * 0.5;
    let weather_multiplier = weather_fuel_multiplier(weather.and_then(|w| w.conditions()));

    let current_rate =
        params.base_rate_kg_per_hour * resistance_factor * weather_multiplier / speed_factor;

    let remaining_waypoints = total_waypoints.saturating_sub(current_index);
    let remaining = current_rate * remaining_waypoints as f64 * params.hours_per_waypoint;

    Ok(FuelEstimate {
        current_rate_kg_per_hour: current_rate,
        remaining_kg: remaining,
        total_kg: current_rate + remaining,
        weather_multiplier,
        speed_factor,
        resistance_factor,
    })
}
