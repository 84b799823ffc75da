//! ContentGuard CLI - Local Content Analysis Frontend
//!
//! A tool for inspecting image statistics and running the content-safety
//! rules against images on disk.

use clap::{Parser, Subcommand};
use contentguard_core::ClassProbability;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

/// ContentGuard - on-device content-safety analysis
#[derive(Parser)]
#[command(name = "contentguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Engine configuration file (JSON); missing fields keep their defaults
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the heuristic statistics of an image
    Stats {
        /// Input image
        image: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Analyze an image against the content rules
    Analyze {
        /// Input image
        image: String,

        /// Classifier predictions file (JSON array of {label, probability})
        #[arg(short, long)]
        predictions: Option<String>,

        /// Single class probability, e.g. Porn=0.42 (repeatable)
        #[arg(long = "prob", value_name = "LABEL=P")]
        probs: Vec<ClassProbability>,

        /// Emit the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective engine configuration
    Thresholds,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Stats { image, json } => {
            commands::stats::run(&image, json)?;
        }

        Commands::Analyze {
            image,
            predictions,
            probs,
            json,
        } => {
            let safe = commands::analyze::run(config, &image, predictions.as_deref(), probs, json)
                .await?;
            if !safe {
                std::process::exit(2);
            }
        }

        Commands::Thresholds => {
            commands::thresholds::run(&config)?;
        }
    }

    Ok(())
}
