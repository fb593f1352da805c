use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::feel::{net_temperature, round_to};
use crate::humidity::{correct_humidity, CorrectedHumidity};
use crate::indices::{
    clothing_index, drying_index, insect_index, outdoor_index, stargazing_outlook, wetness_index,
    DryingInputs, NightSky, OutdoorInputs,
};
use crate::rain::{rain_odds, RainOdds};
use crate::series::{day_window, modal_cloud};
use crate::tables::ReferenceTables;
use crate::types::{CloudCategory, IndexError, IndexResult, RawObservation, Season};

/// Display precision for the net effective temperature
pub const DEFAULT_DECIMALS: u32 = 3;

/// Intermediate metrics computed once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Modal cloud category over the day window
    pub cloud: CloudCategory,
    pub humidity: CorrectedHumidity,
    /// Net effective temperature at full precision
    pub net: f64,
    pub rain: RainOdds,
}

/// Every index for one run, plus the metrics they were computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    pub season: Season,
    pub forecast_date: Option<NaiveDate>,
    pub derived: DerivedMetrics,
    pub insect: IndexResult,
    pub wetness: IndexResult,
    pub outdoor: IndexResult,
    pub drying: IndexResult,
    pub clothing: IndexResult,
    pub stargazing: NightSky,
}

impl IndexReport {
    /// Plain-text rendering with the net temperature at `decimals` places.
    pub fn render_text(&self, decimals: u32) -> String {
        let d = &self.derived;
        let mut lines = Vec::new();
        if let Some(date) = self.forecast_date {
            lines.push(format!("Forecast for {} ({})", date.format("%m-%d"), self.season));
        } else {
            lines.push(format!("Forecast ({})", self.season));
        }
        lines.push(format!("Prevailing cloud: {}", d.cloud));
        lines.push(format!("Corrected humidity: {} - {}", d.humidity.min, d.humidity.max));
        lines.push(format!("Net temperature: {}", round_to(d.net, decimals)));
        lines.push(format!(
            "Rain odds (light/moderate/heavy/torrential): {} {} {} {}",
            d.rain.light, d.rain.moderate, d.rain.heavy, d.rain.torrential
        ));
        lines.push(format!("Insect: {}", self.insect));
        lines.push(format!("Wetness: {}", self.wetness));
        lines.push(format!("Outdoor: {}", self.outdoor));
        lines.push(format!("Drying: {}", self.drying));
        lines.push(format!("Clothing: {}", self.clothing));
        lines.push(format!(
            "Stargazing: from 20:00 {} / from 23:00 {}",
            self.stargazing.evening.advisory, self.stargazing.late.advisory
        ));
        lines.join("\n")
    }
}

impl fmt::Display for IndexReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(DEFAULT_DECIMALS))
    }
}

/// Computes advisory indices from normalized observations.
///
/// Stateless apart from its read-only tables, so one engine can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct IndexEngine {
    tables: Arc<ReferenceTables>,
}

impl IndexEngine {
    /// Build an engine over `tables`, rejecting tables with missing levels.
    pub fn new(tables: ReferenceTables) -> Result<Self, IndexError> {
        tables.validate()?;
        Ok(Self {
            tables: Arc::new(tables),
        })
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Cloud, humidity, net temperature and rain odds for one observation.
    pub fn derive(&self, season: Season, obs: &RawObservation) -> Result<DerivedMetrics, IndexError> {
        obs.validate()?;

        let cloud = modal_cloud(day_window(&obs.clouds)?)?;
        let humidity = correct_humidity(
            &self.tables,
            season,
            cloud,
            obs.min_humidity,
            obs.max_humidity,
        )?;
        let net = net_temperature(obs.mean_temperature(), humidity.mean(), obs.wind_speed)?;
        let rain = rain_odds(&obs.rainfall)?;

        tracing::debug!("Prevailing cloud {}, net temperature {:.3}", cloud, net);
        Ok(DerivedMetrics {
            cloud,
            humidity,
            net,
            rain,
        })
    }

    /// Run the full pipeline for one observation.
    pub fn evaluate(&self, season: Season, obs: &RawObservation) -> Result<IndexReport, IndexError> {
        let derived = self.derive(season, obs)?;
        let tables = self.tables.as_ref();

        let insect = insect_index(tables, season, obs.min_temperature, derived.humidity.max)?;
        let wetness = wetness_index(tables, &derived.rain, obs.condensation)?;
        let outdoor = outdoor_index(
            tables,
            &OutdoorInputs {
                cloud: derived.cloud,
                rain: derived.rain,
                net: derived.net,
                dew_point: obs.dew_point,
                wind: obs.gust_speed,
                pollution: obs.pollution,
            },
        )?;
        let drying = drying_index(
            tables,
            &DryingInputs {
                gust: obs.gust_speed,
                wetness: wetness.level,
                season,
                cloud: derived.cloud,
                humidity: derived.humidity.mean(),
                wind: obs.wind_speed,
                max_temperature: obs.max_temperature,
            },
        )?;
        let clothing = clothing_index(tables, derived.net)?;
        let stargazing = stargazing_outlook(tables, &obs.clouds)?;

        tracing::debug!(
            "Indices: insect {}, wetness {}, outdoor {}, drying {}, clothing {}",
            insect.level,
            wetness.level,
            outdoor.level,
            drying.level,
            clothing.level
        );

        Ok(IndexReport {
            season,
            forecast_date: obs.forecast_date,
            derived,
            insect,
            wetness,
            outdoor,
            drying,
            clothing,
            stargazing,
        })
    }
}

impl Default for IndexEngine {
    /// Engine over the bundled tables
    fn default() -> Self {
        Self {
            tables: Arc::new(ReferenceTables::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::FORECAST_SLOTS;
    use crate::types::{Condensation, IndexKind, Level};

    fn observation() -> RawObservation {
        let mut clouds = vec![CloudCategory::Scattered; FORECAST_SLOTS];
        clouds[7] = CloudCategory::Clear;
        clouds[8] = CloudCategory::Few;
        RawObservation {
            forecast_date: NaiveDate::from_ymd_opt(2026, 5, 2),
            min_temperature: 22.0,
            max_temperature: 28.0,
            min_humidity: 60.0,
            max_humidity: 85.0,
            wind_speed: 10.0,
            gust_speed: 8.0,
            dew_point: 18.0,
            pollution: 40.0,
            clouds,
            rainfall: vec![0.0, 0.2, 0.5, 1.5, 0.0, 0.0, 0.3, 0.0, 2.0, 0.1],
            condensation: Condensation::None,
        }
    }

    #[test]
    fn test_derive() {
        let engine = IndexEngine::default();
        let derived = engine.derive(Season::Spring, &observation()).unwrap();
        assert_eq!(derived.cloud, CloudCategory::Scattered);
        // Spring/scattered offsets are -2 and 0
        assert_eq!(derived.humidity.min, 58.0);
        assert_eq!(derived.humidity.max, 85.0);
        assert_eq!(derived.rain.light, 0.2);
        let expected = net_temperature(25.0, 71.5, 10.0).unwrap();
        assert_eq!(derived.net, expected);
    }

    #[test]
    fn test_evaluate() {
        let engine = IndexEngine::default();
        let report = engine.evaluate(Season::Spring, &observation()).unwrap();
        assert_eq!(report.wetness.level, Level::whole(0));
        assert_eq!(report.stargazing.evening.cloud, CloudCategory::Clear);
        assert_eq!(report.stargazing.late.cloud, CloudCategory::Few);
        assert_eq!(report.forecast_date, NaiveDate::from_ymd_opt(2026, 5, 2));
        assert_eq!(report.clothing.level, crate::indices::clothing_level(report.derived.net));
    }

    #[test]
    fn test_evaluate_rejects_invalid_observation() {
        let engine = IndexEngine::default();
        let mut obs = observation();
        obs.rainfall.clear();
        assert!(matches!(
            engine.evaluate(Season::Summer, &obs),
            Err(IndexError::InvalidInput { field: "rainfall", .. })
        ));
    }

    #[test]
    fn test_new_rejects_incomplete_tables() {
        let mut tables = ReferenceTables::default();
        tables.wetness = crate::tables::AdvisoryTable::new(Vec::new());
        assert!(matches!(
            IndexEngine::new(tables),
            Err(IndexError::TableLookupMiss {
                table: IndexKind::Wetness,
                ..
            })
        ));
    }

    #[test]
    fn test_render_text() {
        let engine = IndexEngine::default();
        let report = engine.evaluate(Season::Spring, &observation()).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("Forecast for 05-02 (spring)"));
        assert!(text.contains("Prevailing cloud: SCT"));
        assert!(text.contains(&format!("Net temperature: {}", round_to(report.derived.net, 3))));
        assert!(text.contains("Stargazing: from 20:00 Excellent"));
    }

    #[test]
    fn test_report_serializes() {
        let engine = IndexEngine::default();
        let report = engine.evaluate(Season::Autumn, &observation()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["season"], "autumn");
        assert_eq!(json["derived"]["cloud"], "SCT");
        assert_eq!(json["stargazing"]["evening"]["cloud"], "SKC");
        assert!(json["clothing"]["level"].is_f64());
    }
}
