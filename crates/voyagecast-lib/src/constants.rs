//! Model constants shared across the ocean, speed, fuel, and cost calculations.

/// Mean Earth radius in kilometres used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per nautical mile (one knot is 1.852 km/h).
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Knots per metre-per-second.
pub const KNOTS_PER_MPS: f64 = 1.943_844;

/// Standard gravity (m/s²) used by the wave height approximation.
pub const GRAVITY: f64 = 9.81;

/// Design service speed of the modelled vessel in knots.
pub const DEFAULT_BASE_SPEED_KN: f64 = 20.0;

/// Speed the ocean model assumes a vessel can make in perfect conditions.
pub const MAX_ACHIEVABLE_SPEED_KN: f64 = 25.0;

/// Floor for the achievable speed derived from ocean state.
pub const MIN_ACHIEVABLE_SPEED_KN: f64 = 3.0;

/// Speed-over-ground bounds applied by the speed adjustment model.
pub const MIN_SOG_KN: f64 = 5.0;
pub const MAX_SOG_KN: f64 = 30.0;

/// Visibility assumed when an observation does not report one (metres).
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

/// Wind thresholds (m/s) used by the fuel and cost surcharges.
pub const WIND_MODERATE_MPS: f64 = 10.0;
pub const WIND_HIGH_MPS: f64 = 15.0;

/// Wave height thresholds (m) used by the speed, fuel, and cost models.
pub const WAVE_MODERATE_M: f64 = 2.0;
pub const WAVE_HIGH_M: f64 = 3.0;

/// Scheduled sailing time between consecutive waypoints.
pub const HOURS_PER_WAYPOINT: f64 = 2.0;

/// Main engine consumption at the design speed (kg/h).
pub const BASE_FUEL_RATE_KG_PER_HOUR: f64 = 1260.0;

/// Marine fuel oil price in USD per kilogram.
pub const FUEL_PRICE_USD_PER_KG: f64 = 0.80;

/// Crew, maintenance, and charter cost per sailing hour (USD).
pub const OPERATIONAL_COST_USD_PER_HOUR: f64 = 5_000.0;

/// Fee per major port call (USD).
pub const MAJOR_PORT_FEE_USD: f64 = 15_000.0;

/// Flat transit fee for canal routes (USD).
pub const CANAL_FEE_USD: f64 = 500_000.0;

/// Cost surcharge applied in severe weather.
pub const SEVERE_WEATHER_COST_MULTIPLIER: f64 = 1.10;

/// Added hull resistance per knot of weather-induced speed loss (N).
pub const RESISTANCE_N_PER_KNOT_LOSS: f64 = 12_000.0;

/// Overall propulsive efficiency used to turn added resistance into shaft power.
pub const PROPULSIVE_EFFICIENCY: f64 = 0.7;

/// Specific fuel oil consumption of the main engine (kg/kWh).
pub const SFOC_KG_PER_KWH: f64 = 0.19;

/// Speed lost per metre of swell when the swell is dead ahead (knots).
pub const SWELL_LOSS_KN_PER_M: f64 = 0.25;
