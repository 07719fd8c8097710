//! Shared fixtures and scripted collaborators for integration tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use voyagecast_lib::error::{Error, Result};
use voyagecast_lib::{AtmosphericObservation, Coordinate, ObservationSource, RouteCatalog};

/// Path to the fixtures directory shared with the CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn fixture_catalog() -> RouteCatalog {
    RouteCatalog::from_path(&fixtures_dir().join("routes.json")).expect("fixture routes load")
}

/// What a scripted waypoint answers.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Reply {
    /// Observation with this wind speed (m/s) blowing from the north.
    Wind(f64),
    Fail(&'static str),
}

/// Observation source answering from a fixed script, keyed by coordinate.
#[allow(dead_code)]
pub struct ScriptedSource {
    script: Vec<(Coordinate, Duration, Reply)>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            script: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reply(mut self, at: Coordinate, delay_ms: u64, reply: Reply) -> Self {
        self.script
            .push((at, Duration::from_millis(delay_ms), reply));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObservationSource for ScriptedSource {
    async fn observe(&self, coordinate: Coordinate) -> Result<AtmosphericObservation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some((_, delay, reply)) = self.script.iter().find(|(at, _, _)| *at == coordinate)
        else {
            return Err(Error::Observation {
                message: format!("no script for {:?}", coordinate),
            });
        };

        tokio::time::sleep(*delay).await;
        match reply {
            Reply::Wind(speed) => Ok(AtmosphericObservation::new(*speed, 0.0, 20.0)),
            Reply::Fail(message) => Err(Error::Observation {
                message: (*message).to_string(),
            }),
        }
    }
}

/// Waypoints along the equator, one degree apart.
#[allow(dead_code)]
pub fn equator(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| Coordinate::new(0.0, i as f64))
        .collect()
}
