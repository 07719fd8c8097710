//! Voyage cost for the remainder of a route.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CANAL_FEE_USD, FUEL_PRICE_USD_PER_KG, HOURS_PER_WAYPOINT, MAJOR_PORT_FEE_USD,
    OPERATIONAL_COST_USD_PER_HOUR, SEVERE_WEATHER_COST_MULTIPLIER, WAVE_HIGH_M, WIND_HIGH_MPS,
};
use crate::fuel::FuelEstimate;
use crate::route::Route;
use crate::speed::{Conditions, SpeedAdjustment};
use crate::weather::WeatherSnapshot;

/// Prices used by the cost model (USD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    pub fuel_price_per_kg: f64,
    pub operational_per_hour: f64,
    pub major_port_fee: f64,
    pub canal_fee: f64,
    pub severe_weather_multiplier: f64,
    pub hours_per_waypoint: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            fuel_price_per_kg: FUEL_PRICE_USD_PER_KG,
            operational_per_hour: OPERATIONAL_COST_USD_PER_HOUR,
            major_port_fee: MAJOR_PORT_FEE_USD,
            canal_fee: CANAL_FEE_USD,
            severe_weather_multiplier: SEVERE_WEATHER_COST_MULTIPLIER,
            hours_per_waypoint: HOURS_PER_WAYPOINT,
        }
    }
}

/// Line items of a [`CostEstimate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub fuel: f64,
    pub operational: f64,
    pub ports: f64,
    pub canal: f64,
    /// Surcharge added on top of the base cost by severe weather.
    pub weather: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub fuel_cost: f64,
    pub operational_cost: f64,
    pub port_fees: f64,
    pub canal_fees: f64,
    pub weather_multiplier: f64,
    pub base_cost: f64,
    pub total_cost: f64,
    pub remaining_hours: f64,
    pub breakdown: CostBreakdown,
}

impl CostEstimate {
    /// Port, canal, and weather charges combined.
    pub fn additional_fees(&self) -> f64 {
        self.port_fees + self.canal_fees + self.breakdown.weather
    }
}

/// Cost surcharge: 10% when wind exceeds 15 m/s or waves exceed 3 m.
pub fn weather_cost_multiplier(rates: &CostRates, conditions: Option<Conditions<'_>>) -> f64 {
    match conditions {
        Some(c) if c.wind_speed_mps() > WIND_HIGH_MPS || c.wave_height_m() > WAVE_HIGH_M => {
            rates.severe_weather_multiplier
        }
        _ => 1.0,
    }
}

/// Estimate cost with the default [`CostRates`].
pub fn estimate_cost(
    fuel: &FuelEstimate,
    current_index: usize,
    total_waypoints: usize,
    route: &Route,
    weather: Option<&WeatherSnapshot>,
) -> CostEstimate {
    estimate_cost_with(
        &CostRates::default(),
        fuel,
        current_index,
        total_waypoints,
        route,
        weather,
    )
}

/// Estimate the cost of the rest of `route` from `current_index`.
///
/// The base cost sums fuel (total kg × price), operational hours, fees for
/// major ports still ahead, and the canal fee on dashed routes. Severe
/// weather scales the base cost; the difference is the weather line item.
pub fn estimate_cost_with(
    rates: &CostRates,
    fuel: &FuelEstimate,
    current_index: usize,
    total_waypoints: usize,
    route: &Route,
    weather: Option<&WeatherSnapshot>,
) -> CostEstimate {
    let remaining_hours =
        total_waypoints.saturating_sub(current_index) as f64 * rates.hours_per_waypoint;

    let fuel_cost = fuel.total_kg * rates.fuel_price_per_kg;
    let operational_cost = rates.operational_per_hour * remaining_hours;
    let port_fees = route.major_ports_after(current_index) as f64 * rates.major_port_fee;
    let canal_fees = if route.style.is_canal() {
        rates.canal_fee
    } else {
        0.0
    };

    let weather_multiplier = weather_cost_multiplier(rates, weather.and_then(|w| w.conditions()));
    let base_cost = fuel_cost + operational_cost + port_fees + canal_fees;

    CostEstimate {
        fuel_cost,
        operational_cost,
        port_fees,
        canal_fees,
        weather_multiplier,
        base_cost,
        total_cost: base_cost * weather_multiplier,
        remaining_hours,
        breakdown: CostBreakdown {
            fuel: fuel_cost,
            operational: operational_cost,
            ports: port_fees,
            canal: canal_fees,
            weather: base_cost * (weather_multiplier - 1.0),
        },
    }
}

/// Advisory notes for the cost screen, derived only from the estimates.
pub fn cost_recommendations(
    speed: &SpeedAdjustment,
    fuel: &FuelEstimate,
    cost: &CostEstimate,
    base_speed_kn: f64,
) -> Vec<String> {
    let mut notes = Vec::new();

    if fuel.weather_multiplier > 1.1 {
        notes.push(
            "Consider route adjustment due to high weather impact on fuel consumption".to_string(),
        );
    }
    if cost.weather_multiplier > 1.05 {
        notes.push("Weather conditions are increasing operational costs significantly".to_string());
    }
    if speed.speed_over_ground_kn < base_speed_kn * 0.9 {
        notes.push("Speed reduced due to weather - consider schedule adjustment".to_string());
    }
    if cost.canal_fees > 0.0 {
        notes.push("Canal fees are a major cost factor - ensure efficient transit".to_string());
    }

    if notes.is_empty() {
        notes.push(
            "Conditions are favorable for optimal performance and cost efficiency".to_string(),
        );
    }
    notes
}
