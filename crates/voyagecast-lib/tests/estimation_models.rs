mod common;

use chrono::Utc;
use voyagecast_lib::cost::estimate_cost;
use voyagecast_lib::fuel::{estimate_fuel, FuelEstimate};
use voyagecast_lib::{
    adjust_speed, derive_ocean_state, estimate_voyage, route_distance_km, AtmosphericObservation,
    Conditions, Coordinate, EstimateRequest, LineStyle, Route, WeatherSnapshot,
};

fn observed(wind: f64, wind_dir: f64) -> WeatherSnapshot {
    WeatherSnapshot::observed(
        0,
        Coordinate::new(0.0, 0.0),
        AtmosphericObservation::new(wind, wind_dir, 20.0),
        Utc::now(),
    )
}

#[test]
fn ocean_state_is_deterministic() {
    let obs = AtmosphericObservation::new(13.7, 211.0, 17.3).with_visibility(4200.0);
    let first = derive_ocean_state(&obs);
    for _ in 0..5 {
        assert_eq!(derive_ocean_state(&obs), first);
    }
}

#[test]
fn route_distance_is_additive_over_any_split() {
    let catalog = common::fixture_catalog();
    let route = catalog.require(1).unwrap();
    let coords = &route.coordinates;
    let total = route_distance_km(coords);

    for split in 0..coords.len() {
        let head = route_distance_km(&coords[..=split]);
        let tail = route_distance_km(&coords[split..]);
        assert!(
            (head + tail - total).abs() < 1e-6,
            "split at {split}: {head} + {tail} != {total}"
        );
    }
}

#[test]
fn speed_over_ground_stays_within_bounds() {
    for wind in [0.0, 5.0, 12.0, 18.0, 25.0, 40.0] {
        for dir in [0.0, 90.0, 180.0, 270.0] {
            for base in [3.0, 12.0, 20.0, 29.0] {
                let snap = observed(wind, dir);
                let adj = adjust_speed(base, snap.conditions(), 0.0);
                let sog = adj.speed_over_ground_kn;
                assert!(
                    (5.0..=30.0).contains(&sog),
                    "wind {wind} dir {dir} base {base}: {sog}"
                );
            }
        }
    }
}

#[test]
fn rough_weather_burns_more_fuel_than_calm() {
    let calm = estimate_fuel(20.0, 20.0, 2, 10, None).unwrap();

    // 16 m/s gives wind above 15 and waves above 3.
    let storm = observed(16.0, 0.0);
    let rough = estimate_fuel(20.0, 20.0, 2, 10, Some(&storm)).unwrap();

    assert!(rough.current_rate_kg_per_hour > calm.current_rate_kg_per_hour);
    assert!(rough.total_kg > calm.total_kg);
    assert!((rough.weather_multiplier - 1.5).abs() < 1e-12);
}

#[test]
fn canal_route_cost_scenario() {
    let route = Route {
        id: 11,
        name: "Canal transit".into(),
        color: "#000000".into(),
        style: LineStyle::Dashed,
        coordinates: vec![Coordinate::new(0.0, 0.0); 10],
        ports: Vec::new(),
    };
    let fuel = FuelEstimate {
        current_rate_kg_per_hour: 0.0,
        remaining_kg: 5000.0,
        total_kg: 5000.0,
        weather_multiplier: 1.0,
        speed_factor: 1.0,
        resistance_factor: 1.0,
    };

    let cost = estimate_cost(&fuel, 0, 10, &route, None);

    assert_eq!(cost.fuel_cost, 4000.0);
    assert_eq!(cost.operational_cost, 100_000.0);
    assert_eq!(cost.port_fees, 0.0);
    assert_eq!(cost.canal_fees, 500_000.0);
    assert_eq!(cost.weather_multiplier, 1.0);
    assert_eq!(cost.base_cost, 604_000.0);
    assert_eq!(cost.total_cost, 604_000.0);
}

#[test]
fn full_estimate_threads_weather_through_every_model() {
    let catalog = common::fixture_catalog();
    let route = catalog.require(1).unwrap();
    let storm = observed(16.0, 180.0);

    let calm = estimate_voyage(route, &EstimateRequest::at(2), None).unwrap();
    let rough = estimate_voyage(route, &EstimateRequest::at(2), Some(&storm)).unwrap();

    assert!(rough.speed.speed_over_ground_kn < calm.speed.speed_over_ground_kn);
    assert!(rough.fuel.total_kg > calm.fuel.total_kg);
    assert!(rough.cost.total_cost > calm.cost.total_cost);
    assert_eq!(rough.cost.weather_multiplier, 1.10);
    // Port Said and Rotterdam lie ahead of waypoint 2.
    assert_eq!(calm.cost.port_fees, 30_000.0);
    assert_eq!(calm.cost.canal_fees, 500_000.0);
}

#[test]
fn conditions_view_reads_the_snapshot() {
    let snap = observed(10.0, 45.0);
    let conditions: Conditions<'_> = snap.conditions().expect("observed");
    assert_eq!(conditions.wind_speed_mps(), 10.0);
    assert_eq!(conditions.wave_height_m(), 2.14);
}
