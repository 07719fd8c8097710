use thiserror::Error;

/// Convenient result alias for the voyage estimation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A single waypoint's observation could not be retrieved.
    ///
    /// The aggregator records these as failed snapshots; they never escape a
    /// batch on their own.
    #[error("{message}")]
    Observation { message: String },

    /// Every waypoint in a weather batch failed.
    #[error(
        "failed to retrieve any valid weather data for route {route_id} \
         ({attempted} waypoints attempted); check the API key or connection"
    )]
    WeatherUnavailable { route_id: i64, attempted: usize },

    /// The forecast predictor failed or returned nothing usable.
    #[error("{message}")]
    Forecast { message: String },

    /// Raised when route data breaks the catalog contract.
    #[error("invalid route data: {message}")]
    InvalidRoute { message: String },

    /// Raised when a caller passes arguments the engine cannot work with.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Raised when a route id is not present in the catalog.
    #[error("unknown route id: {id}{}", format_known(.known))]
    UnknownRoute { id: i64, known: Vec<i64> },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True for failures that belong to one waypoint rather than the batch.
    pub fn is_per_item(&self) -> bool {
        matches!(self, Error::Observation { .. } | Error::Http(_))
    }
}

fn format_known(known: &[i64]) -> String {
    if known.is_empty() {
        String::new()
    } else {
        format!(
            ". Known routes: {}",
            known
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
