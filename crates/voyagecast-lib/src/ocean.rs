//! Synthetic ocean state derived from a single atmospheric observation.
//!
//! No marine data feed is consulted: wave, swell and current figures are
//! empirical functions of the observed wind, so the same observation always
//! produces the same ocean state.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_VISIBILITY_M, GRAVITY, MAX_ACHIEVABLE_SPEED_KN, MIN_ACHIEVABLE_SPEED_KN,
};

/// Surface weather at one waypoint as reported by the observation source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericObservation {
    /// Wind speed in m/s.
    pub wind_speed_mps: f64,
    /// Direction the wind is reported against, degrees 0-359.
    pub wind_direction_deg: f64,
    pub air_temperature_c: f64,
    /// Horizontal visibility in metres, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_m: Option<f64>,
    /// Precipitation over the last hour in millimetres, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
    /// Short condition text such as "light rain".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AtmosphericObservation {
    /// Observation with only the fields the ocean model needs.
    pub fn new(wind_speed_mps: f64, wind_direction_deg: f64, air_temperature_c: f64) -> Self {
        Self {
            wind_speed_mps,
            wind_direction_deg,
            air_temperature_c,
            visibility_m: None,
            precipitation_mm: None,
            description: None,
        }
    }

    pub fn with_visibility(mut self, visibility_m: f64) -> Self {
        self.visibility_m = Some(visibility_m);
        self
    }

    pub fn with_precipitation(mut self, precipitation_mm: f64) -> Self {
        self.precipitation_mm = Some(precipitation_mm);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Visibility in kilometres, falling back to 10 km when unreported.
    pub fn visibility_km(&self) -> f64 {
        self.visibility_m.unwrap_or(DEFAULT_VISIBILITY_M) / 1000.0
    }
}

/// Ocean conditions derived from an [`AtmosphericObservation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanState {
    pub wave_height_m: f64,
    pub swell_height_m: f64,
    pub swell_direction_deg: f64,
    pub current_speed_mps: f64,
    pub current_direction_deg: f64,
    pub water_temperature_c: f64,
    pub visibility_km: f64,
    /// Speed the vessel can make in these conditions, never below 3 knots.
    pub achievable_speed_kn: f64,
}

/// Derive ocean conditions from one observation.
///
/// Formulas, evaluated at full precision and rounded only on output:
///
/// ```text
/// wave    = 0.21 · wind² / g
/// swell   = 0.7 · wave,          swell_dir   = (wind_dir + 15) mod 360
/// current = 0.03 · wind,         current_dir = (wind_dir + 30) mod 360
/// water   = air − 1.5
/// speed   = max(3, 25 − 0.5·wave − 0.1·max(0, wind − 10) − 0.5·max(0, 5 − vis_km))
/// ```
///
/// Lengths and speeds are rounded to two decimals, temperature to one, and
/// directions are floored to whole degrees.
///
/// # Examples
///
/// ```
/// use voyagecast_lib::ocean::{derive_ocean_state, AtmosphericObservation};
///
/// let state = derive_ocean_state(&AtmosphericObservation::new(10.0, 90.0, 20.0));
/// assert_eq!(state.wave_height_m, 2.14);
/// assert_eq!(state.swell_direction_deg, 105.0);
/// assert_eq!(state.water_temperature_c, 18.5);
/// ```
pub fn derive_ocean_state(observation: &AtmosphericObservation) -> OceanState {
    let wind = observation.wind_speed_mps.max(0.0);
    let wind_dir = observation.wind_direction_deg;

    let wave = 0.21 * wind.powi(2) / GRAVITY;
    let swell = 0.7 * wave;
    let current = 0.03 * wind;
    let water_temp = observation.air_temperature_c - 1.5;
    let visibility_km = observation.visibility_km();
    let speed = achievable_speed_kn(wind, wave, visibility_km);

    OceanState {
        wave_height_m: round_to(wave, 2),
        swell_height_m: round_to(swell, 2),
        swell_direction_deg: ((wind_dir + 15.0) % 360.0).floor(),
        current_speed_mps: round_to(current, 2),
        current_direction_deg: ((wind_dir + 30.0) % 360.0).floor(),
        water_temperature_c: round_to(water_temp, 1),
        visibility_km,
        achievable_speed_kn: round_to(speed, 2),
    }
}

/// Speed achievable in the given conditions before course-relative effects.
pub fn achievable_speed_kn(wind_speed_mps: f64, wave_height_m: f64, visibility_km: f64) -> f64 {
    let mut reduction = 0.5 * wave_height_m;
    if wind_speed_mps > 10.0 {
        reduction += 0.1 * (wind_speed_mps - 10.0);
    }
    if visibility_km < 5.0 {
        reduction += 0.5 * (5.0 - visibility_km);
    }
    (MAX_ACHIEVABLE_SPEED_KN - reduction).max(MIN_ACHIEVABLE_SPEED_KN)
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calm_air_gives_flat_sea_and_full_speed() {
        let state = derive_ocean_state(&AtmosphericObservation::new(0.0, 0.0, 15.0));
        assert_eq!(state.wave_height_m, 0.0);
        assert_eq!(state.swell_height_m, 0.0);
        assert_eq!(state.current_speed_mps, 0.0);
        assert_eq!(state.visibility_km, 10.0);
        assert_eq!(state.achievable_speed_kn, 25.0);
    }

    #[test]
    fn strong_wind_rounds_only_at_the_end() {
        // wave = 0.21 * 400 / 9.81 = 8.5626911...
        // swell from the unrounded wave = 5.9938837... -> 5.99
        let state = derive_ocean_state(&AtmosphericObservation::new(20.0, 350.0, 10.0));
        assert_eq!(state.wave_height_m, 8.56);
        assert_eq!(state.swell_height_m, 5.99);
        assert_eq!(state.swell_direction_deg, 5.0);
        assert_eq!(state.current_direction_deg, 20.0);
        assert_eq!(state.current_speed_mps, 0.6);
        // 25 - 4.28134... - 1.0 = 19.71865...
        assert_eq!(state.achievable_speed_kn, 19.72);
    }

    #[test]
    fn poor_visibility_slows_the_vessel() {
        let obs = AtmosphericObservation::new(0.0, 0.0, 15.0).with_visibility(1000.0);
        let state = derive_ocean_state(&obs);
        assert_eq!(state.visibility_km, 1.0);
        assert_eq!(state.achievable_speed_kn, 23.0);
    }

    #[test]
    fn achievable_speed_never_drops_below_three_knots() {
        let obs = AtmosphericObservation::new(60.0, 0.0, 15.0).with_visibility(0.0);
        let state = derive_ocean_state(&obs);
        assert_eq!(state.achievable_speed_kn, 3.0);
    }

    #[test]
    fn fractional_directions_are_floored() {
        let state = derive_ocean_state(&AtmosphericObservation::new(5.0, 100.7, 15.0));
        assert_eq!(state.swell_direction_deg, 115.0);
        assert_eq!(state.current_direction_deg, 130.0);
    }

    #[test]
    fn water_temperature_is_one_decimal() {
        let state = derive_ocean_state(&AtmosphericObservation::new(0.0, 0.0, 21.37));
        assert_eq!(state.water_temperature_c, 19.9);
    }
}
