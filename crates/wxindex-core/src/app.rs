use std::sync::Arc;

use wxindex_engine::{IndexEngine, IndexReport, ObservationSource, ReferenceTables, Season};

use crate::config::OutputFormat;
use crate::{AppError, Config, ConfigError};

/// Per-run choices that override the configured defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub season: Option<Season>,
    pub target_aqi: Option<f64>,
}

/// Application state: configuration plus an engine over the active tables
pub struct App {
    config: Arc<Config>,
    engine: IndexEngine,
}

impl App {
    /// Create an application from a loaded configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        let tables = match &config.tables.path {
            Some(path) => {
                tracing::info!("Using reference tables from {}", path.display());
                ReferenceTables::load(path)?
            }
            None => ReferenceTables::default(),
        };
        let engine = IndexEngine::new(tables)?;

        Ok(Self {
            config: Arc::new(config),
            engine,
        })
    }

    /// Fetch one observation and compute every index for it
    pub fn evaluate(
        &self,
        source: &dyn ObservationSource,
        options: RunOptions,
    ) -> Result<IndexReport, AppError> {
        let season = options
            .season
            .or(self.config.run.season)
            .ok_or_else(|| ConfigError::MissingSetting("season".to_string()))?;

        tracing::info!("Evaluating indices from {} for {}", source.name(), season);
        let mut observation = source.fetch()?;
        if let Some(aqi) = options.target_aqi.or(self.config.run.target_aqi) {
            observation.pollution = aqi;
        }

        let report = self.engine.evaluate(season, &observation)?;
        tracing::info!("Evaluation complete");
        Ok(report)
    }

    /// Render a report in the configured output format
    pub fn render(&self, report: &IndexReport) -> Result<String, AppError> {
        match self.config.output.format {
            OutputFormat::Text => Ok(report.render_text(self.config.output.decimals)),
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| AppError::Other(anyhow::Error::new(e))),
        }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &IndexEngine {
        &self.engine
    }
}
