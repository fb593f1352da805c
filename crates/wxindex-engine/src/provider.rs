use std::path::{Path, PathBuf};

use crate::types::{IndexError, RawObservation};

/// A collaborator that supplies normalized observations.
///
/// Fetching, parsing and retrying against remote weather services live
/// behind this trait; the engine only ever sees the finished observation.
pub trait ObservationSource {
    /// Human-readable name used in logs and errors
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<RawObservation, IndexError>;
}

/// Reads an observation that was already normalized to JSON.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ObservationSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch(&self) -> Result<RawObservation, IndexError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            IndexError::Observation(format!("{}: {}", self.path.display(), e))
        })?;
        let observation: RawObservation = serde_json::from_str(&contents).map_err(|e| {
            IndexError::Observation(format!("{}: {}", self.path.display(), e))
        })?;
        tracing::debug!("Read observation from {}", self.path.display());
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CloudCategory;

    #[test]
    fn test_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obs.json");
        std::fs::write(
            &path,
            r#"{
                "forecast_date": "2026-04-06",
                "min_temperature": 19.0,
                "max_temperature": 23.0,
                "min_humidity": 70,
                "max_humidity": 95,
                "wind_speed": 12.0,
                "gust_speed": 15.5,
                "dew_point": 18.5,
                "clouds": ["OVC", "OVC", "BKN"],
                "rainfall": [5.0, 12.0],
                "condensation": "slight"
            }"#,
        )
        .unwrap();

        let source = JsonFileSource::new(&path);
        let obs = source.fetch().unwrap();
        assert_eq!(source.name(), "json-file");
        assert_eq!(obs.clouds[2], CloudCategory::Broken);
        assert_eq!(obs.gust_speed, 15.5);
        assert_eq!(obs.forecast_date.unwrap().to_string(), "2026-04-06");
    }

    #[test]
    fn test_missing_file() {
        let source = JsonFileSource::new("/nonexistent/obs.json");
        assert!(matches!(source.fetch(), Err(IndexError::Observation(_))));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obs.json");
        std::fs::write(&path, "{ \"min_temperature\": ").unwrap();
        let err = JsonFileSource::new(&path).fetch().unwrap_err();
        assert!(err.to_string().contains("obs.json"));
    }
}
