//! Wellsight CLI - water well prediction from the terminal
//!
//! Commands:
//! - Score a drilling site and optionally export a report
//! - Review prediction history
//! - Check mock weather and its drilling impact
//! - Browse the soil and rock reference table
//! - Ask the FAQ assistant
//! - Measure distances to candidate sites

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use wellsight_runtime::{telemetry, WellsightConfig};

mod commands;
mod output;

use commands::{advisor, distance, history, predict, soils, weather};
use output::{print_error, OutputFormat};

/// Wellsight CLI application
#[derive(Parser)]
#[command(name = "wellsight")]
#[command(about = "Wellsight - groundwater prediction for water well drilling", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WELLSIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Log level or filter directive (overrides configuration)
    #[arg(long, env = "WELLSIGHT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Score a drilling site
    Predict(predict::PredictArgs),

    /// Show prediction history
    History {
        /// Only show the summary figures
        #[arg(long)]
        summary: bool,
    },

    /// Current weather and its effect on drilling
    Weather(weather::WeatherArgs),

    /// Search the soil and rock reference table
    Soils(soils::SoilsArgs),

    /// Ask the assistant a question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// List frequently asked questions
    Faq {
        /// Show the answer to one question (1-based)
        number: Option<usize>,
    },

    /// Distances from a reference point to candidate sites
    Distance(distance::DistanceArgs),

    /// Show effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = WellsightConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    config.logging.json |= cli.json_logs;
    // Already-installed subscribers are fine.
    let _ = telemetry::init(&config.logging);
    debug!(
        config = ?cli.config,
        storage = ?config.storage,
        overlap = ?config.lifecycle.overlap,
        "wellsight cli starting"
    );

    match cli.command {
        Commands::Predict(args) => predict::execute(args, &config, cli.output).await,
        Commands::History { summary } => history::execute(summary, &config, cli.output).await,
        Commands::Weather(args) => weather::execute(args, &config, cli.output).await,
        Commands::Soils(args) => soils::execute(args, cli.output),
        Commands::Ask { message } => advisor::ask(&message.join(" "), cli.output),
        Commands::Faq { number } => advisor::faq(number, cli.output),
        Commands::Distance(args) => distance::execute(args, cli.output),
        Commands::Config => output::print_json(&config),
    }
}
