//! Weather-adjusted speed over ground and added resistance.
//!
//! Wind, waves, and current scale the vessel's base speed through discrete
//! multipliers; swell only contributes resistance. Every factor keeps its own
//! speed impact and resistance so display surfaces can break the total down.

use serde::{Deserialize, Serialize};

use crate::constants::{
    KNOTS_PER_MPS, MAX_SOG_KN, MIN_SOG_KN, PROPULSIVE_EFFICIENCY, RESISTANCE_N_PER_KNOT_LOSS,
    SFOC_KG_PER_KWH, SWELL_LOSS_KN_PER_M, WAVE_HIGH_M, WAVE_MODERATE_M,
};
use crate::ocean::{AtmosphericObservation, OceanState};

/// Weather inputs for one waypoint: the observation and its derived ocean.
#[derive(Debug, Clone, Copy)]
pub struct Conditions<'a> {
    pub observation: &'a AtmosphericObservation,
    pub ocean: &'a OceanState,
}

impl<'a> Conditions<'a> {
    pub fn new(observation: &'a AtmosphericObservation, ocean: &'a OceanState) -> Self {
        Self { observation, ocean }
    }

    pub fn wind_speed_mps(&self) -> f64 {
        self.observation.wind_speed_mps
    }

    pub fn wave_height_m(&self) -> f64 {
        self.ocean.wave_height_m
    }
}

/// How the wind meets the vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindRegime {
    Tailwind,
    Headwind,
    Crosswind,
    Calm,
}

/// How the current meets the vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentRegime {
    Favourable,
    Adverse,
    Cross,
    Slack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindFactor {
    pub speed_mps: f64,
    pub relative_angle_deg: f64,
    pub regime: WindRegime,
    pub multiplier: f64,
    /// Knots lost to wind; negative when a tailwind adds speed.
    pub speed_impact_kn: f64,
    pub resistance_n: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveFactor {
    pub height_m: f64,
    pub multiplier: f64,
    pub speed_loss_kn: f64,
    pub resistance_n: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwellFactor {
    pub height_m: f64,
    pub relative_angle_deg: f64,
    pub speed_loss_kn: f64,
    pub resistance_n: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentFactor {
    pub speed_mps: f64,
    pub relative_angle_deg: f64,
    pub regime: CurrentRegime,
    pub multiplier: f64,
    /// Current component along the course in knots; positive pushes the
    /// vessel forward.
    pub along_course_kn: f64,
    pub resistance_n: f64,
}

/// Per-factor contributions to the adjusted speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub wind: WindFactor,
    pub waves: WaveFactor,
    pub swell: SwellFactor,
    pub current: CurrentFactor,
}

impl FactorBreakdown {
    fn neutral() -> Self {
        Self {
            wind: WindFactor {
                speed_mps: 0.0,
                relative_angle_deg: 0.0,
                regime: WindRegime::Calm,
                multiplier: 1.0,
                speed_impact_kn: 0.0,
                resistance_n: 0.0,
            },
            waves: WaveFactor {
                height_m: 0.0,
                multiplier: 1.0,
                speed_loss_kn: 0.0,
                resistance_n: 0.0,
            },
            swell: SwellFactor {
                height_m: 0.0,
                relative_angle_deg: 0.0,
                speed_loss_kn: 0.0,
                resistance_n: 0.0,
            },
            current: CurrentFactor {
                speed_mps: 0.0,
                relative_angle_deg: 0.0,
                regime: CurrentRegime::Slack,
                multiplier: 1.0,
                along_course_kn: 0.0,
                resistance_n: 0.0,
            },
        }
    }

    /// Product of the multipliers that scale speed (swell does not).
    pub fn combined_multiplier(&self) -> f64 {
        self.wind.multiplier * self.waves.multiplier * self.current.multiplier
    }
}

/// Result of the speed adjustment model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedAdjustment {
    /// Always within [5, 30] knots.
    pub speed_over_ground_kn: f64,
    pub course_over_ground_deg: f64,
    pub factors: FactorBreakdown,
    pub power_increase_kw: f64,
    pub fuel_increase_kg_per_hour: f64,
    pub total_resistance_n: f64,
}

impl SpeedAdjustment {
    /// Knots gained (positive) or lost (negative) against the base speed.
    pub fn impact_kn(&self, base_speed_kn: f64) -> f64 {
        self.speed_over_ground_kn - base_speed_kn
    }
}

/// Angle of a directional source relative to the vessel course, in [0, 360).
pub fn relative_angle(source_deg: f64, course_deg: f64) -> f64 {
    (source_deg - course_deg + 360.0).rem_euclid(360.0)
}

fn is_along(angle: f64) -> bool {
    !(45.0..=315.0).contains(&angle)
}

fn is_opposing(angle: f64) -> bool {
    angle > 135.0 && angle < 225.0
}

/// Wind regime and speed multiplier for a wind speed at a relative angle.
pub fn wind_multiplier(wind_speed_mps: f64, angle: f64) -> (WindRegime, f64) {
    if is_along(angle) {
        (WindRegime::Tailwind, 1.0 + 0.02 * wind_speed_mps)
    } else if is_opposing(angle) {
        (WindRegime::Headwind, 1.0 - 0.03 * wind_speed_mps)
    } else {
        (WindRegime::Crosswind, 1.0 - 0.01 * wind_speed_mps)
    }
}

/// Speed multiplier for a significant wave height.
pub fn wave_multiplier(wave_height_m: f64) -> f64 {
    if wave_height_m > WAVE_HIGH_M {
        0.8
    } else if wave_height_m > WAVE_MODERATE_M {
        0.9
    } else {
        1.0
    }
}

/// Current regime and speed multiplier for a current at a relative angle.
pub fn current_multiplier(current_speed_mps: f64, angle: f64) -> (CurrentRegime, f64) {
    if is_along(angle) {
        (CurrentRegime::Favourable, 1.0 + 0.1 * current_speed_mps)
    } else if is_opposing(angle) {
        (CurrentRegime::Adverse, 1.0 - 0.1 * current_speed_mps)
    } else {
        (CurrentRegime::Cross, 1.0)
    }
}

fn clamp_sog(speed_kn: f64) -> f64 {
    if speed_kn.is_nan() {
        MIN_SOG_KN
    } else {
        speed_kn.clamp(MIN_SOG_KN, MAX_SOG_KN)
    }
}

/// Adjust a base speed for the weather met on `course_deg`.
///
/// `SOG = base × wind × waves × current`, clamped to [5, 30] knots. Swell,
/// which the multipliers ignore, is only carried in the resistance figures.
/// Added resistance is [`RESISTANCE_N_PER_KNOT_LOSS`] per knot of loss
/// summed over the factors (a following current or tailwind offsets it),
/// floored at zero. Power is that resistance moved at the base speed through
/// the propulsive efficiency, and the fuel increase applies the engine SFOC.
///
/// Without conditions the result is the clamped base speed with neutral
/// factors.
pub fn adjust_speed(
    base_speed_kn: f64,
    conditions: Option<Conditions<'_>>,
    course_deg: f64,
) -> SpeedAdjustment {
    let Some(conditions) = conditions else {
        return SpeedAdjustment {
            speed_over_ground_kn: clamp_sog(base_speed_kn),
            course_over_ground_deg: course_deg,
            factors: FactorBreakdown::neutral(),
            power_increase_kw: 0.0,
            fuel_increase_kg_per_hour: 0.0,
            total_resistance_n: 0.0,
        };
    };

    let obs = conditions.observation;
    let ocean = conditions.ocean;

    let wind_angle = relative_angle(obs.wind_direction_deg, course_deg);
    let (wind_regime, wind_mult) = wind_multiplier(obs.wind_speed_mps, wind_angle);
    let wind_impact = base_speed_kn * (1.0 - wind_mult);

    let wave_mult = wave_multiplier(ocean.wave_height_m);
    let wave_loss = base_speed_kn * (1.0 - wave_mult);

    // Following swell (angle 0) costs nothing; head swell costs the most.
    let swell_angle = relative_angle(ocean.swell_direction_deg, course_deg);
    let swell_loss =
        SWELL_LOSS_KN_PER_M * ocean.swell_height_m * (1.0 - swell_angle.to_radians().cos()) / 2.0;

    let current_angle = relative_angle(ocean.current_direction_deg, course_deg);
    let (current_regime, current_mult) =
        current_multiplier(ocean.current_speed_mps, current_angle);
    let along_course = ocean.current_speed_mps * KNOTS_PER_MPS * current_angle.to_radians().cos();

    let factors = FactorBreakdown {
        wind: WindFactor {
            speed_mps: obs.wind_speed_mps,
            relative_angle_deg: wind_angle,
            regime: wind_regime,
            multiplier: wind_mult,
            speed_impact_kn: wind_impact,
            resistance_n: RESISTANCE_N_PER_KNOT_LOSS * wind_impact,
        },
        waves: WaveFactor {
            height_m: ocean.wave_height_m,
            multiplier: wave_mult,
            speed_loss_kn: wave_loss,
            resistance_n: RESISTANCE_N_PER_KNOT_LOSS * wave_loss,
        },
        swell: SwellFactor {
            height_m: ocean.swell_height_m,
            relative_angle_deg: swell_angle,
            speed_loss_kn: swell_loss,
            resistance_n: RESISTANCE_N_PER_KNOT_LOSS * swell_loss,
        },
        current: CurrentFactor {
            speed_mps: ocean.current_speed_mps,
            relative_angle_deg: current_angle,
            regime: current_regime,
            multiplier: current_mult,
            along_course_kn: along_course,
            resistance_n: -RESISTANCE_N_PER_KNOT_LOSS * along_course,
        },
    };

    let total_resistance = (factors.wind.resistance_n
        + factors.waves.resistance_n
        + factors.swell.resistance_n
        + factors.current.resistance_n)
        .max(0.0);

    let base_speed_mps = base_speed_kn.max(0.0) / KNOTS_PER_MPS;
    let power_kw = total_resistance * base_speed_mps / (1000.0 * PROPULSIVE_EFFICIENCY);

    SpeedAdjustment {
        speed_over_ground_kn: clamp_sog(base_speed_kn * factors.combined_multiplier()),
        course_over_ground_deg: course_deg,
        factors,
        power_increase_kw: power_kw,
        fuel_increase_kg_per_hour: power_kw * SFOC_KG_PER_KWH,
        total_resistance_n: total_resistance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::derive_ocean_state;

    fn adjust(base: f64, obs: &AtmosphericObservation, course: f64) -> SpeedAdjustment {
        let ocean = derive_ocean_state(obs);
        adjust_speed(base, Some(Conditions::new(obs, &ocean)), course)
    }

    #[test]
    fn relative_angle_wraps_into_range() {
        assert_eq!(relative_angle(10.0, 350.0), 20.0);
        assert_eq!(relative_angle(350.0, 10.0), 340.0);
        assert_eq!(relative_angle(180.0, 0.0), 180.0);
        assert_eq!(relative_angle(0.0, 720.0), 0.0);
    }

    #[test]
    fn regimes_follow_angle_bands() {
        assert_eq!(wind_multiplier(10.0, 10.0).0, WindRegime::Tailwind);
        assert_eq!(wind_multiplier(10.0, 320.0).0, WindRegime::Tailwind);
        assert_eq!(wind_multiplier(10.0, 180.0).0, WindRegime::Headwind);
        assert_eq!(wind_multiplier(10.0, 90.0).0, WindRegime::Crosswind);
        // Band edges are crosswind.
        assert_eq!(wind_multiplier(10.0, 45.0).0, WindRegime::Crosswind);
        assert_eq!(wind_multiplier(10.0, 135.0).0, WindRegime::Crosswind);
        assert_eq!(current_multiplier(1.0, 225.0), (CurrentRegime::Cross, 1.0));
    }

    #[test]
    fn no_weather_keeps_base_speed() {
        let adj = adjust_speed(20.0, None, 45.0);
        assert_eq!(adj.speed_over_ground_kn, 20.0);
        assert_eq!(adj.course_over_ground_deg, 45.0);
        assert_eq!(adj.total_resistance_n, 0.0);
        assert_eq!(adj.factors.wind.regime, WindRegime::Calm);
    }

    #[test]
    fn headwind_in_rough_sea_matches_multipliers() {
        // 10 m/s from dead ahead: wind ×0.7, waves 2.14 m ×0.9.
        // Current runs at wind_dir + 30 = 210°, inside the adverse band: ×(1 - 0.03).
        let obs = AtmosphericObservation::new(10.0, 180.0, 20.0);
        let adj = adjust(20.0, &obs, 0.0);
        let expected = 20.0 * 0.7 * 0.9 * (1.0 - 0.1 * 0.3);
        assert!((adj.speed_over_ground_kn - expected).abs() < 1e-9);
        assert_eq!(adj.factors.wind.regime, WindRegime::Headwind);
        assert_eq!(adj.factors.current.regime, CurrentRegime::Adverse);
        assert!((adj.factors.wind.speed_impact_kn - 6.0).abs() < 1e-9);
        assert!((adj.factors.waves.speed_loss_kn - 2.0).abs() < 1e-9);
        assert!(adj.factors.swell.speed_loss_kn > 0.0);
        assert!(adj.factors.current.along_course_kn < 0.0);
    }

    #[test]
    fn resistance_totals_are_consistent_with_factors() {
        let obs = AtmosphericObservation::new(12.0, 170.0, 20.0);
        let adj = adjust(20.0, &obs, 0.0);
        let f = &adj.factors;
        let sum = f.wind.resistance_n + f.waves.resistance_n + f.swell.resistance_n + f.current.resistance_n;
        assert!((adj.total_resistance_n - sum.max(0.0)).abs() < 1e-6);
        let power = adj.total_resistance_n * (20.0 / KNOTS_PER_MPS) / (1000.0 * PROPULSIVE_EFFICIENCY);
        assert!((adj.power_increase_kw - power).abs() < 1e-9);
        assert!((adj.fuel_increase_kg_per_hour - power * SFOC_KG_PER_KWH).abs() < 1e-9);
    }

    #[test]
    fn tailwind_adds_speed_and_no_resistance() {
        let obs = AtmosphericObservation::new(5.0, 0.0, 20.0);
        let adj = adjust(20.0, &obs, 0.0);
        assert!(adj.speed_over_ground_kn > 20.0);
        assert!(adj.factors.wind.speed_impact_kn < 0.0);
        assert_eq!(adj.total_resistance_n, 0.0);
        assert_eq!(adj.power_increase_kw, 0.0);
    }

    #[test]
    fn output_is_clamped() {
        let gale = AtmosphericObservation::new(40.0, 180.0, 20.0);
        assert_eq!(adjust(20.0, &gale, 0.0).speed_over_ground_kn, MIN_SOG_KN);

        let push = AtmosphericObservation::new(15.0, 0.0, 20.0);
        assert_eq!(adjust(28.0, &push, 0.0).speed_over_ground_kn, MAX_SOG_KN);

        assert_eq!(adjust_speed(f64::NAN, None, 0.0).speed_over_ground_kn, MIN_SOG_KN);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let obs = AtmosphericObservation::new(8.3, 213.0, 17.0);
        assert_eq!(adjust(18.0, &obs, 97.0), adjust(18.0, &obs, 97.0));
    }
}
