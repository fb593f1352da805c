use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use wxindex_core::{App, Config, OutputFormat, RunOptions};
use wxindex_engine::{JsonFileSource, ReferenceTables, Season};

#[derive(Parser)]
#[command(name = "wxindex")]
#[command(about = "Weather comfort and advisory indices from normalized forecast observations")]
#[command(version)]
struct Cli {
    /// Path to the configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every index for one observation
    Evaluate {
        /// Normalized observation JSON file
        #[arg(short, long)]
        observation: PathBuf,

        /// Season (spring, summer, autumn, winter)
        #[arg(short, long)]
        season: Option<Season>,

        /// Expected air quality index for the day
        #[arg(long)]
        aqi: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the bundled reference tables, or check a table file
    Tables {
        /// Table file to validate
        #[arg(long)]
        check: Option<PathBuf>,
    },

    /// Infer the season from a five-day mean temperature
    Season {
        /// Five-day mean temperature (°C)
        #[arg(long, allow_hyphen_values = true)]
        mean: f64,

        /// Date the mean ends on (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    wxindex_core::init()?;

    match cli.command {
        Commands::Evaluate {
            observation,
            season,
            aqi,
            json,
        } => {
            let (mut config, _) = Config::load_validated(cli.config.as_deref())?;
            if json {
                config.output.format = OutputFormat::Json;
            }
            let app = App::new(config)?;
            let source = JsonFileSource::new(observation);
            let options = RunOptions {
                season,
                target_aqi: aqi,
            };

            let report = app.evaluate(&source, options).map_err(|e| {
                tracing::error!("{}", e);
                anyhow::anyhow!("{} ({})", e.user_message(), e)
            })?;
            println!("{}", app.render(&report)?);
        }
        Commands::Tables { check } => match check {
            Some(path) => {
                ReferenceTables::load(&path)
                    .with_context(|| format!("Table file {} is not usable", path.display()))?;
                println!("{}: all index levels covered", path.display());
            }
            None => print!("{}", ReferenceTables::default().to_toml_string()?),
        },
        Commands::Season { mean, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            println!("{}", Season::from_pentad_mean(mean, date)?);
        }
    }

    Ok(())
}
