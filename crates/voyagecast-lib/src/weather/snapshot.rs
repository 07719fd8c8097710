//! Per-waypoint weather records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ocean::{derive_ocean_state, AtmosphericObservation, OceanState};
use crate::route::Coordinate;
use crate::speed::Conditions;

/// Longest slice of a retrieval error kept in a failed snapshot.
pub const ERROR_MESSAGE_LIMIT: usize = 50;

/// Weather at one waypoint: either an observation with its derived ocean
/// state, or the reason retrieval failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherSnapshot {
    Observed {
        waypoint_index: usize,
        coordinates: Coordinate,
        observation: AtmosphericObservation,
        ocean_state: OceanState,
        timestamp: DateTime<Utc>,
    },
    Failed {
        waypoint_index: usize,
        coordinates: Coordinate,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl WeatherSnapshot {
    /// Build a successful snapshot, deriving the ocean state from `observation`.
    pub fn observed(
        waypoint_index: usize,
        coordinates: Coordinate,
        observation: AtmosphericObservation,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let ocean_state = derive_ocean_state(&observation);
        WeatherSnapshot::Observed {
            waypoint_index,
            coordinates,
            observation,
            ocean_state,
            timestamp,
        }
    }

    /// Build a failed snapshot from a raw retrieval error message.
    pub fn failed(
        waypoint_index: usize,
        coordinates: Coordinate,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        WeatherSnapshot::Failed {
            waypoint_index,
            coordinates,
            error: unavailable_message(message),
            timestamp,
        }
    }

    pub fn waypoint_index(&self) -> usize {
        match self {
            WeatherSnapshot::Observed { waypoint_index, .. }
            | WeatherSnapshot::Failed { waypoint_index, .. } => *waypoint_index,
        }
    }

    pub fn coordinates(&self) -> Coordinate {
        match self {
            WeatherSnapshot::Observed { coordinates, .. }
            | WeatherSnapshot::Failed { coordinates, .. } => *coordinates,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            WeatherSnapshot::Observed { timestamp, .. }
            | WeatherSnapshot::Failed { timestamp, .. } => *timestamp,
        }
    }

    pub fn is_observed(&self) -> bool {
        matches!(self, WeatherSnapshot::Observed { .. })
    }

    pub fn observation(&self) -> Option<&AtmosphericObservation> {
        match self {
            WeatherSnapshot::Observed { observation, .. } => Some(observation),
            WeatherSnapshot::Failed { .. } => None,
        }
    }

    pub fn ocean_state(&self) -> Option<&OceanState> {
        match self {
            WeatherSnapshot::Observed { ocean_state, .. } => Some(ocean_state),
            WeatherSnapshot::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WeatherSnapshot::Failed { error, .. } => Some(error),
            WeatherSnapshot::Observed { .. } => None,
        }
    }

    /// Observation and ocean state as model input; `None` for failures.
    pub fn conditions(&self) -> Option<Conditions<'_>> {
        match self {
            WeatherSnapshot::Observed {
                observation,
                ocean_state,
                ..
            } => Some(Conditions::new(observation, ocean_state)),
            WeatherSnapshot::Failed { .. } => None,
        }
    }
}

/// Message stored on a failed snapshot: the first 50 characters of the
/// retrieval error behind a fixed prefix.
pub fn unavailable_message(message: &str) -> String {
    let truncated: String = message.chars().take(ERROR_MESSAGE_LIMIT).collect();
    format!("Data unavailable: {truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    #[test]
    fn long_errors_are_truncated_to_fifty_chars() {
        let long = "x".repeat(80);
        let message = unavailable_message(&long);
        assert_eq!(message, format!("Data unavailable: {}...", "x".repeat(50)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let message = unavailable_message(&"é".repeat(60));
        assert!(message.starts_with("Data unavailable: "));
        assert_eq!(message.chars().filter(|c| *c == 'é').count(), 50);
    }

    #[test]
    fn observed_snapshot_derives_ocean_state() {
        let snap = WeatherSnapshot::observed(
            2,
            Coordinate::new(1.0, 2.0),
            AtmosphericObservation::new(10.0, 90.0, 20.0),
            at(),
        );
        assert_eq!(snap.waypoint_index(), 2);
        assert_eq!(snap.ocean_state().map(|o| o.wave_height_m), Some(2.14));
        assert!(snap.conditions().is_some());
        assert!(snap.error().is_none());
    }

    #[test]
    fn failed_snapshot_has_no_conditions() {
        let snap = WeatherSnapshot::failed(0, Coordinate::new(0.0, 0.0), "timeout", at());
        assert!(!snap.is_observed());
        assert!(snap.conditions().is_none());
        assert_eq!(snap.error(), Some("Data unavailable: timeout..."));
    }

    #[test]
    fn snapshots_serialize_with_status_tag() {
        let snap = WeatherSnapshot::failed(1, Coordinate::new(3.0, 4.0), "boom", at());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["waypoint_index"], 1);
        assert_eq!(json["coordinates"], serde_json::json!([3.0, 4.0]));
    }
}
