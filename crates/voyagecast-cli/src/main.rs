use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use voyagecast_cli::commands::estimate::EstimateArgs;
use voyagecast_cli::commands::{analytics, estimate, forecast, routes, weather, CommandContext};
use voyagecast_cli::config::ClientConfig;
use voyagecast_cli::logging::{init_logging, LoggingConfig};
use voyagecast_cli::output::OutputFormat;
use voyagecast_cli::terminal::ColorPalette;
use voyagecast_lib::constants::DEFAULT_BASE_SPEED_KN;

#[derive(Parser, Debug)]
#[command(author, version, about = "Voyage weather, speed, fuel and cost estimates")]
struct Cli {
    /// Path to the routes JSON file.
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors in text output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the routes in the catalog.
    Routes,
    /// Show total and per-leg great-circle distance of a route.
    Distance {
        #[arg(long)]
        route: i64,
    },
    /// Fetch current weather for every waypoint of a route.
    Weather {
        #[arg(long)]
        route: i64,
    },
    /// Estimate speed, fuel and cost from a waypoint to the end of a route.
    Estimate {
        #[arg(long)]
        route: i64,
        /// Zero-based waypoint index.
        #[arg(long, default_value_t = 0)]
        waypoint: usize,
        /// Base speed in knots.
        #[arg(long, default_value_t = DEFAULT_BASE_SPEED_KN)]
        speed: f64,
        /// Course over ground in degrees; defaults to the bearing of the next leg.
        #[arg(long)]
        course: Option<f64>,
        /// Skip the weather lookup and assume calm conditions.
        #[arg(long)]
        offline: bool,
    },
    /// Summarise travel time, fuel and cost for a whole route.
    Analytics {
        #[arg(long)]
        route: i64,
        /// Base speed in knots.
        #[arg(long, default_value_t = DEFAULT_BASE_SPEED_KN)]
        speed: f64,
        /// Skip the weather lookup and use default averages.
        #[arg(long)]
        offline: bool,
    },
    /// Ten-day temperature forecast for a waypoint.
    Forecast {
        #[arg(long)]
        route: i64,
        /// Zero-based waypoint index.
        #[arg(long, default_value_t = 0)]
        waypoint: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let ctx = CommandContext::new(
        cli.routes.as_deref(),
        ClientConfig::from_env(),
        cli.format,
        ColorPalette::detect(cli.no_color),
    )?;

    match cli.command {
        Command::Routes => routes::handle_list_routes(&ctx),
        Command::Distance { route } => routes::handle_distance(&ctx, route),
        Command::Weather { route } => weather::handle_weather(&ctx, route).await,
        Command::Estimate {
            route,
            waypoint,
            speed,
            course,
            offline,
        } => {
            let args = EstimateArgs {
                route_id: route,
                waypoint,
                base_speed_kn: speed,
                course_deg: course,
                offline,
            };
            estimate::handle_estimate(&ctx, &args).await
        }
        Command::Analytics {
            route,
            speed,
            offline,
        } => analytics::handle_analytics(&ctx, route, speed, offline).await,
        Command::Forecast { route, waypoint } => {
            forecast::handle_forecast(&ctx, route, waypoint).await
        }
    }
}
