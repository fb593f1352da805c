use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Climatological season, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// Infer the season from a five-day mean temperature (°C).
    ///
    /// A pentad mean of 22 °C or more is summer and below 10 °C is winter.
    /// In between, the first half of the year is spring and the second
    /// half autumn.
    pub fn from_pentad_mean(mean_celsius: f64, date: NaiveDate) -> Result<Self, IndexError> {
        if !mean_celsius.is_finite() {
            return Err(IndexError::invalid("pentad_mean", "must be a finite number"));
        }
        let season = if mean_celsius >= 22.0 {
            Self::Summer
        } else if mean_celsius < 10.0 {
            Self::Winter
        } else if date.month() <= 7 {
            Self::Spring
        } else {
            Self::Autumn
        };
        Ok(season)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" | "fall" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            other => Err(IndexError::invalid(
                "season",
                format!("unknown season '{}' (expected spring, summer, autumn or winter)", other),
            )),
        }
    }
}

/// Sky coverage class, ordered from clear to overcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CloudCategory {
    #[serde(rename = "SKC", alias = "clear")]
    Clear,
    #[serde(rename = "FEW", alias = "few")]
    Few,
    #[serde(rename = "SCT", alias = "scattered")]
    Scattered,
    #[serde(rename = "BKN", alias = "broken")]
    Broken,
    #[serde(rename = "OVC", alias = "overcast")]
    Overcast,
}

impl CloudCategory {
    pub const ALL: [CloudCategory; 5] = [
        Self::Clear,
        Self::Few,
        Self::Scattered,
        Self::Broken,
        Self::Overcast,
    ];

    /// METAR cover code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Clear => "SKC",
            Self::Few => "FEW",
            Self::Scattered => "SCT",
            Self::Broken => "BKN",
            Self::Overcast => "OVC",
        }
    }

    /// Parse a forecast weather code such as `"BKN,RA"`.
    ///
    /// Only the cover code before the first comma is significant.
    pub fn from_weather_code(code: &str) -> Result<Self, IndexError> {
        let cover = code.split(',').next().unwrap_or_default();
        cover.parse()
    }
}

impl fmt::Display for CloudCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CloudCategory {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SKC" | "CLR" | "CLEAR" => Ok(Self::Clear),
            "FEW" => Ok(Self::Few),
            "SCT" | "SCATTERED" => Ok(Self::Scattered),
            "BKN" | "BROKEN" => Ok(Self::Broken),
            "OVC" | "OVERCAST" => Ok(Self::Overcast),
            other => Err(IndexError::invalid(
                "cloud",
                format!("unknown cloud cover code '{}'", other),
            )),
        }
    }
}

/// Wall-sweating severity: surface condensation from a damp, warm air mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condensation {
    #[default]
    None,
    Slight,
    Strong,
}

impl Condensation {
    pub fn flag(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Slight => 1,
            Self::Strong => 2,
        }
    }
}

impl TryFrom<u8> for Condensation {
    type Error = IndexError;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(Self::None),
            1 => Ok(Self::Slight),
            2 => Ok(Self::Strong),
            other => Err(IndexError::invalid(
                "condensation",
                format!("flag must be 0, 1 or 2, got {}", other),
            )),
        }
    }
}

/// Advisory level on a half-step scale from 0 to 5.
///
/// Stored as a count of half steps so that levels compare and hash exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Level(u8);

impl Level {
    pub const MAX_HALVES: u8 = 10;

    pub const fn whole(level: u8) -> Self {
        Self(level * 2)
    }

    pub const fn from_halves(halves: u8) -> Self {
        Self(halves)
    }

    pub fn halves(&self) -> u8 {
        self.0
    }

    pub fn value(&self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl TryFrom<f64> for Level {
    type Error = IndexError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let halves = value * 2.0;
        if !value.is_finite() || halves.fract() != 0.0 || halves < 0.0 {
            return Err(IndexError::invalid(
                "level",
                format!("{} is not a non-negative multiple of 0.5", value),
            ));
        }
        if halves > f64::from(Self::MAX_HALVES) {
            return Err(IndexError::invalid(
                "level",
                format!("{} is above the maximum level 5", value),
            ));
        }
        Ok(Self(halves as u8))
    }
}

impl From<Level> for f64 {
    fn from(level: Level) -> Self {
        level.value()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

/// The indices the engine publishes, used to name advisory tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Insect,
    Clothing,
    Wetness,
    Drying,
    Outdoor,
    Stargazing,
}

impl IndexKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insect => "insect",
            Self::Clothing => "clothing",
            Self::Wetness => "wetness",
            Self::Drying => "drying",
            Self::Outdoor => "outdoor",
            Self::Stargazing => "stargazing",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized forecast inputs for one run.
///
/// Units: °C, %, km/h, mm and an AQI-like pollution scalar. No unit
/// conversion happens inside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub forecast_date: Option<NaiveDate>,
    pub min_temperature: f64,
    pub max_temperature: f64,
    /// Forecast humidity before the season/cloud correction
    pub min_humidity: f64,
    pub max_humidity: f64,
    pub wind_speed: f64,
    pub gust_speed: f64,
    pub dew_point: f64,
    #[serde(default)]
    pub pollution: f64,
    /// One cover sample per 3-hourly forecast slot, starting 23:00
    pub clouds: Vec<CloudCategory>,
    /// Rainfall accumulation per sample point (mm)
    pub rainfall: Vec<f64>,
    #[serde(default)]
    pub condensation: Condensation,
}

impl RawObservation {
    /// Reject out-of-domain values before any index is computed.
    pub fn validate(&self) -> Result<(), IndexError> {
        let scalars = [
            ("min_temperature", self.min_temperature),
            ("max_temperature", self.max_temperature),
            ("min_humidity", self.min_humidity),
            ("max_humidity", self.max_humidity),
            ("wind_speed", self.wind_speed),
            ("gust_speed", self.gust_speed),
            ("dew_point", self.dew_point),
            ("pollution", self.pollution),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(IndexError::invalid(field, "must be a finite number"));
            }
        }

        if self.min_temperature > self.max_temperature {
            return Err(IndexError::invalid(
                "min_temperature",
                format!(
                    "{} exceeds max_temperature {}",
                    self.min_temperature, self.max_temperature
                ),
            ));
        }
        for (field, value) in [("min_humidity", self.min_humidity), ("max_humidity", self.max_humidity)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(IndexError::invalid(field, format!("{} is outside 0..=100", value)));
            }
        }
        if self.min_humidity > self.max_humidity {
            return Err(IndexError::invalid(
                "min_humidity",
                format!("{} exceeds max_humidity {}", self.min_humidity, self.max_humidity),
            ));
        }
        for (field, value) in [("wind_speed", self.wind_speed), ("gust_speed", self.gust_speed)] {
            if value < 0.0 {
                return Err(IndexError::invalid(field, format!("{} is negative", value)));
            }
        }
        if self.pollution < 0.0 {
            return Err(IndexError::invalid(
                "pollution",
                format!("{} is negative", self.pollution),
            ));
        }

        Ok(())
    }

    /// Mean of the forecast extremes
    pub fn mean_temperature(&self) -> f64 {
        (self.min_temperature + self.max_temperature) / 2.0
    }
}

/// An index level paired with its advisory text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResult {
    pub level: Level,
    pub advisory: String,
}

impl IndexResult {
    pub fn new(level: Level, advisory: impl Into<String>) -> Self {
        Self {
            level,
            advisory: advisory.into(),
        }
    }
}

impl fmt::Display for IndexResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level, self.advisory)
    }
}

/// Index engine errors
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("No {table} table entry for {key}")]
    TableLookupMiss { table: IndexKind, key: String },
    #[error("Failed to load reference tables: {0}")]
    TableLoad(String),
    #[error("Observation unavailable: {0}")]
    Observation(String),
}

impl IndexError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn missing(table: IndexKind, key: impl fmt::Display) -> Self {
        Self::TableLookupMiss {
            table,
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_observation() -> RawObservation {
        RawObservation {
            forecast_date: None,
            min_temperature: 21.0,
            max_temperature: 27.0,
            min_humidity: 65.0,
            max_humidity: 90.0,
            wind_speed: 8.0,
            gust_speed: 10.5,
            dew_point: 19.5,
            pollution: 40.0,
            clouds: vec![CloudCategory::Few; 16],
            rainfall: vec![0.0; 10],
            condensation: Condensation::None,
        }
    }

    #[test]
    fn test_season_parse() {
        assert_eq!("Spring".parse::<Season>().unwrap(), Season::Spring);
        assert_eq!(" winter ".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Autumn);
        assert!(matches!(
            "monsoon".parse::<Season>(),
            Err(IndexError::InvalidInput { field: "season", .. })
        ));
    }

    #[test]
    fn test_season_from_pentad_mean() {
        let april = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
        let october = NaiveDate::from_ymd_opt(2026, 10, 10).unwrap();
        assert_eq!(Season::from_pentad_mean(24.0, april).unwrap(), Season::Summer);
        assert_eq!(Season::from_pentad_mean(22.0, october).unwrap(), Season::Summer);
        assert_eq!(Season::from_pentad_mean(9.9, april).unwrap(), Season::Winter);
        assert_eq!(Season::from_pentad_mean(16.0, april).unwrap(), Season::Spring);
        assert_eq!(Season::from_pentad_mean(16.0, october).unwrap(), Season::Autumn);
        assert!(Season::from_pentad_mean(f64::NAN, april).is_err());
    }

    #[test]
    fn test_cloud_codes() {
        assert_eq!("skc".parse::<CloudCategory>().unwrap(), CloudCategory::Clear);
        assert_eq!("OVC".parse::<CloudCategory>().unwrap(), CloudCategory::Overcast);
        assert_eq!(
            CloudCategory::from_weather_code("BKN,RA").unwrap(),
            CloudCategory::Broken
        );
        assert!(CloudCategory::from_weather_code("").is_err());
        assert!("XYZ".parse::<CloudCategory>().is_err());
    }

    #[test]
    fn test_cloud_ordering() {
        assert!(CloudCategory::Clear < CloudCategory::Few);
        assert!(CloudCategory::Broken < CloudCategory::Overcast);
    }

    #[test]
    fn test_cloud_serde_uses_codes() {
        let json = serde_json::to_string(&CloudCategory::Scattered).unwrap();
        assert_eq!(json, "\"SCT\"");
        let parsed: CloudCategory = serde_json::from_str("\"overcast\"").unwrap();
        assert_eq!(parsed, CloudCategory::Overcast);
    }

    #[test]
    fn test_condensation_flag() {
        assert_eq!(Condensation::try_from(0).unwrap(), Condensation::None);
        assert_eq!(Condensation::try_from(2).unwrap(), Condensation::Strong);
        assert_eq!(Condensation::Slight.flag(), 1);
        assert!(Condensation::try_from(3).is_err());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::whole(3).to_string(), "3");
        assert_eq!(Level::from_halves(5).to_string(), "2.5");
        assert_eq!(Level::whole(0).to_string(), "0");
    }

    #[test]
    fn test_level_from_f64() {
        assert_eq!(Level::try_from(4.5).unwrap(), Level::from_halves(9));
        assert_eq!(Level::try_from(2.0).unwrap(), Level::whole(2));
        assert!(Level::try_from(2.3).is_err());
        assert!(Level::try_from(-1.0).is_err());
        assert!(Level::try_from(5.5).is_err());
        assert!(Level::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_observation_validate_ok() {
        assert!(sample_observation().validate().is_ok());
    }

    #[test]
    fn test_observation_rejects_negative_wind() {
        let mut obs = sample_observation();
        obs.wind_speed = -1.0;
        assert!(matches!(
            obs.validate(),
            Err(IndexError::InvalidInput { field: "wind_speed", .. })
        ));
    }

    #[test]
    fn test_observation_rejects_humidity_out_of_range() {
        let mut obs = sample_observation();
        obs.max_humidity = 104.0;
        assert!(matches!(
            obs.validate(),
            Err(IndexError::InvalidInput { field: "max_humidity", .. })
        ));
    }

    #[test]
    fn test_observation_rejects_nan() {
        let mut obs = sample_observation();
        obs.dew_point = f64::NAN;
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_observation_rejects_inverted_temperatures() {
        let mut obs = sample_observation();
        obs.min_temperature = 30.0;
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_observation_json_defaults() {
        let json = r#"{
            "min_temperature": 18.0,
            "max_temperature": 24.0,
            "min_humidity": 60,
            "max_humidity": 85,
            "wind_speed": 6.0,
            "gust_speed": 9.0,
            "dew_point": 16.0,
            "clouds": ["SKC", "FEW"],
            "rainfall": [0.0, 2.5]
        }"#;
        let obs: RawObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.condensation, Condensation::None);
        assert_eq!(obs.pollution, 0.0);
        assert!(obs.forecast_date.is_none());
        assert_eq!(obs.clouds, vec![CloudCategory::Clear, CloudCategory::Few]);
    }
}
