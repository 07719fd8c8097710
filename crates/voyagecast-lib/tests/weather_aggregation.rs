mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{equator, Reply, ScriptedSource};
use voyagecast_lib::error::Error;
use voyagecast_lib::{Selection, SelectionTracker, WeatherAggregator, WeatherSnapshot};

#[tokio::test]
async fn snapshots_keep_waypoint_order_regardless_of_completion() {
    let points = equator(4);
    // Later waypoints answer first.
    let source = ScriptedSource::new()
        .reply(points[0], 60, Reply::Wind(4.0))
        .reply(points[1], 40, Reply::Fail("connection reset"))
        .reply(points[2], 20, Reply::Wind(12.0))
        .reply(points[3], 0, Reply::Wind(16.0));
    let aggregator = WeatherAggregator::from_source(source);

    let snapshots = aggregator
        .fetch_route_weather(5, &points)
        .await
        .expect("some waypoints succeed");

    let indices: Vec<usize> = snapshots.iter().map(WeatherSnapshot::waypoint_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    for (snapshot, point) in snapshots.iter().zip(&points) {
        assert_eq!(snapshot.coordinates(), *point);
    }

    assert_eq!(
        snapshots[0].observation().map(|o| o.wind_speed_mps),
        Some(4.0)
    );
    assert_eq!(
        snapshots[1].error(),
        Some("Data unavailable: connection reset...")
    );
    assert_eq!(
        snapshots[3].observation().map(|o| o.wind_speed_mps),
        Some(16.0)
    );
}

#[tokio::test]
async fn one_failure_does_not_sink_the_batch() {
    let points = equator(3);
    let source = ScriptedSource::new()
        .reply(points[0], 0, Reply::Fail("timeout"))
        .reply(points[1], 0, Reply::Wind(8.0))
        .reply(points[2], 0, Reply::Fail("timeout"));
    let snapshots = WeatherAggregator::from_source(source)
        .fetch_route_weather(1, &points)
        .await
        .unwrap();

    let observed = snapshots.iter().filter(|s| s.is_observed()).count();
    assert_eq!(observed, 1);
    assert_eq!(snapshots.len(), 3);
}

#[tokio::test]
async fn all_failures_surface_a_single_error() {
    let points = equator(5);
    let source = points.iter().fold(ScriptedSource::new(), |source, p| {
        source.reply(*p, 0, Reply::Fail("API Key is missing"))
    });
    let source = Arc::new(source);
    let aggregator = WeatherAggregator::new(source.clone());

    let err = aggregator
        .fetch_route_weather(9, &points)
        .await
        .expect_err("nothing succeeded");

    match err {
        Error::WeatherUnavailable {
            route_id,
            attempted,
        } => {
            assert_eq!(route_id, 9);
            assert_eq!(attempted, 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(source.calls(), 5);
}

#[tokio::test]
async fn empty_waypoint_list_is_rejected() {
    let aggregator = WeatherAggregator::from_source(ScriptedSource::new());
    let err = aggregator.fetch_route_weather(1, &[]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[tokio::test]
async fn long_errors_are_truncated() {
    let points = equator(2);
    let long = "upstream service returned an unexpected payload while decoding the body";
    let source = ScriptedSource::new()
        .reply(points[0], 0, Reply::Fail(long))
        .reply(points[1], 0, Reply::Wind(3.0));
    let snapshots = WeatherAggregator::from_source(source)
        .fetch_route_weather(2, &points)
        .await
        .unwrap();

    let expected = format!("Data unavailable: {}...", &long[..50]);
    assert_eq!(snapshots[0].error(), Some(expected.as_str()));
}

#[tokio::test]
async fn superseded_selection_is_discarded() {
    let points = equator(3);
    let source = points.iter().fold(ScriptedSource::new(), |source, p| {
        source.reply(*p, 50, Reply::Wind(6.0))
    });
    let aggregator = WeatherAggregator::from_source(source);
    let tracker = SelectionTracker::new();

    let first = tracker.begin();
    let (outcome, _) = tokio::join!(
        aggregator.fetch_for_selection(&tracker, first, 1, &points),
        async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            tracker.begin()
        }
    );

    assert_eq!(outcome.unwrap(), Selection::Stale);
}

#[tokio::test]
async fn current_selection_keeps_its_results() {
    let points = equator(2);
    let source = points.iter().fold(ScriptedSource::new(), |source, p| {
        source.reply(*p, 0, Reply::Wind(6.0))
    });
    let aggregator = WeatherAggregator::from_source(source);
    let tracker = SelectionTracker::new();

    let generation = tracker.begin();
    let outcome = aggregator
        .fetch_for_selection(&tracker, generation, 1, &points)
        .await
        .unwrap();

    let snapshots = outcome.into_current().expect("selection still current");
    assert_eq!(snapshots.len(), 2);
}
