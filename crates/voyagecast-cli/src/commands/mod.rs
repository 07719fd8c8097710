//! Subcommand handlers.
//!
//! `main.rs` parses arguments and builds a [`CommandContext`]; each module
//! here loads what it needs, runs the library models and hands a report to
//! [`crate::output`].

pub mod analytics;
pub mod estimate;
pub mod forecast;
pub mod routes;
pub mod weather;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use voyagecast_lib::{HttpForecastPredictor, OpenWeatherClient, RouteCatalog};

use crate::config::{ClientConfig, ROUTES_ENV};
use crate::output::{write_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Everything a handler needs besides its own arguments.
pub struct CommandContext {
    pub catalog: RouteCatalog,
    pub config: ClientConfig,
    pub format: OutputFormat,
    pub palette: ColorPalette,
}

impl CommandContext {
    pub fn new(
        routes: Option<&Path>,
        config: ClientConfig,
        format: OutputFormat,
        palette: ColorPalette,
    ) -> Result<Self> {
        let catalog = load_route_catalog(routes, &config)?;
        Ok(Self {
            catalog,
            config,
            format,
            palette,
        })
    }

    pub fn weather_client(&self) -> Result<OpenWeatherClient> {
        OpenWeatherClient::new(
            self.config.openweather_base_url.clone(),
            self.config.openweather_api_key.clone(),
            self.config.http_timeout,
        )
        .context("failed to build the weather client")
    }

    pub fn forecast_predictor(&self) -> Result<HttpForecastPredictor> {
        HttpForecastPredictor::new(
            self.config.forecast_base_url.clone(),
            self.config.http_timeout,
        )
        .context("failed to build the forecast client")
    }

    /// Write `report` as JSON, or through `render` in text mode.
    pub fn emit<T, F>(&self, report: &T, render: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&mut dyn Write, &ColorPalette) -> Result<()>,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.format {
            OutputFormat::Json => write_json(&mut out, report),
            OutputFormat::Text => render(&mut out, &self.palette),
        }
    }
}

/// Load the route catalog.
///
/// Searches in the following order:
/// 1. The `--routes` argument
/// 2. `VOYAGECAST_ROUTES`
/// 3. `routes.json` in the working directory
/// 4. Debug fixture path (only in debug builds)
pub fn load_route_catalog(explicit: Option<&Path>, config: &ClientConfig) -> Result<RouteCatalog> {
    if let Some(path) = explicit {
        return RouteCatalog::from_path(path)
            .with_context(|| format!("failed to load routes from {}", path.display()));
    }

    let candidates = route_candidates(config);
    let path = candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!("routes.json not found; pass --routes or set {ROUTES_ENV}")
        })?;

    RouteCatalog::from_path(&path)
        .with_context(|| format!("failed to load routes from {}", path.display()))
}

fn route_candidates(config: &ClientConfig) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = &config.routes_path {
        candidates.push(path.clone());
    }

    candidates.push(PathBuf::from("routes.json"));

    if cfg!(debug_assertions) {
        let fixture =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/routes.json");
        candidates.push(fixture);
    }

    candidates
}
