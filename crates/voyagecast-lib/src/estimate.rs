use serde::Serialize;

use crate::constants::DEFAULT_BASE_SPEED_KN;
use crate::cost::{cost_recommendations, estimate_cost_with, CostEstimate, CostRates};
use crate::error::{Error, Result};
use crate::fuel::{estimate_fuel_with, FuelEstimate, FuelParams};
use crate::geo::course_at;
use crate::route::Route;
use crate::speed::{adjust_speed, SpeedAdjustment};
use crate::weather::WeatherSnapshot;

/// Where and how fast the vessel is sailing when the estimate is taken.
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub waypoint_index: usize,
    pub base_speed_kn: f64,
    /// Course over ground; the bearing of the leg leaving the waypoint when
    /// unset.
    pub course_deg: Option<f64>,
    pub fuel: FuelParams,
    pub rates: CostRates,
}

impl EstimateRequest {
    /// Request at `waypoint_index` with the default vessel and prices.
    pub fn at(waypoint_index: usize) -> Self {
        Self {
            waypoint_index,
            base_speed_kn: DEFAULT_BASE_SPEED_KN,
            course_deg: None,
            fuel: FuelParams::default(),
            rates: CostRates::default(),
        }
    }

    pub fn with_base_speed(mut self, base_speed_kn: f64) -> Self {
        self.base_speed_kn = base_speed_kn;
        self
    }

    pub fn with_course(mut self, course_deg: f64) -> Self {
        self.course_deg = Some(course_deg);
        self
    }
}

/// Speed, fuel and cost for the rest of a route from one waypoint.
#[derive(Debug, Clone, Serialize)]
pub struct VoyageEstimate {
    pub route_id: i64,
    pub waypoint_index: usize,
    pub total_waypoints: usize,
    pub base_speed_kn: f64,
    pub speed: SpeedAdjustment,
    pub fuel: FuelEstimate,
    pub cost: CostEstimate,
    pub recommendations: Vec<String>,
}

/// Run the speed, fuel and cost models at one waypoint of `route`.
///
/// `weather` is the snapshot for that waypoint, if any; a failed snapshot is
/// treated as calm conditions.
///
/// Remaining fuel and hours count `total - index` waypoints, so the last
/// valid index still carries one waypoint of sailing. The zero-remaining case
/// of [`estimate_fuel`](crate::fuel::estimate_fuel) is only reachable by
/// calling the fuel model directly with `index == total`.
pub fn estimate_voyage(
    route: &Route,
    request: &EstimateRequest,
    weather: Option<&WeatherSnapshot>,
) -> Result<VoyageEstimate> {
    let total_waypoints = route.waypoint_count();
    if request.waypoint_index >= total_waypoints {
        return Err(Error::InvalidInput {
            message: format!(
                "waypoint {} is outside route {} ({} waypoints)",
                request.waypoint_index, route.id, total_waypoints
            ),
        });
    }

    let course = request
        .course_deg
        .or_else(|| course_at(&route.coordinates, request.waypoint_index))
        .unwrap_or(0.0);
    let conditions = weather.and_then(WeatherSnapshot::conditions);

    let speed = adjust_speed(request.base_speed_kn, conditions, course);
    let fuel = estimate_fuel_with(
        &request.fuel,
        speed.speed_over_ground_kn,
        request.base_speed_kn,
        request.waypoint_index,
        total_waypoints,
        weather,
    )?;
    let cost = estimate_cost_with(
        &request.rates,
        &fuel,
        request.waypoint_index,
        total_waypoints,
        route,
        weather,
    );
    let recommendations = cost_recommendations(&speed, &fuel, &cost, request.base_speed_kn);

    Ok(VoyageEstimate {
        route_id: route.id,
        waypoint_index: request.waypoint_index,
        total_waypoints,
        base_speed_kn: request.base_speed_kn,
        speed,
        fuel,
        cost,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{Coordinate, LineStyle};

    fn route() -> Route {
        Route {
            id: 4,
            name: "North".into(),
            color: "#fff".into(),
            style: LineStyle::Solid,
            coordinates: vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(1.0, 0.0),
                Coordinate::new(2.0, 0.0),
            ],
            ports: Vec::new(),
        }
    }

    #[test]
    fn course_defaults_to_leg_bearing() {
        let est = estimate_voyage(&route(), &EstimateRequest::at(0), None).unwrap();
        assert!(est.speed.course_over_ground_deg.abs() < 1e-9);
        assert_eq!(est.total_waypoints, 3);
        assert_eq!(est.cost.remaining_hours, 6.0);
    }

    #[test]
    fn explicit_course_wins() {
        let request = EstimateRequest::at(1).with_course(90.0);
        let est = estimate_voyage(&route(), &request, None).unwrap();
        assert_eq!(est.speed.course_over_ground_deg, 90.0);
    }

    #[test]
    fn last_waypoint_still_counts_one_leg() {
        let est = estimate_voyage(&route(), &EstimateRequest::at(2), None).unwrap();
        assert_eq!(est.fuel.current_rate_kg_per_hour, 1260.0);
        assert_eq!(est.fuel.remaining_kg, 2520.0);
        assert_eq!(est.fuel.total_kg, 3780.0);
        assert_eq!(est.cost.remaining_hours, 2.0);
    }

    #[test]
    fn waypoint_outside_route_is_rejected() {
        let err = estimate_voyage(&route(), &EstimateRequest::at(3), None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn invalid_speed_propagates_from_fuel_model() {
        let request = EstimateRequest::at(0).with_base_speed(-1.0);
        assert!(estimate_voyage(&route(), &request, None).is_err());
    }
}
