use serde::{Deserialize, Serialize};

use crate::tables::ReferenceTables;
use crate::types::{CloudCategory, IndexError, Season};

/// Forecast humidity after the season/cloud correction.
///
/// Values are a relative adjustment and may leave 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectedHumidity {
    pub min: f64,
    pub max: f64,
}

impl CorrectedHumidity {
    pub fn mean(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Apply the season × cloud offsets to forecast min/max humidity.
pub fn correct_humidity(
    tables: &ReferenceTables,
    season: Season,
    cloud: CloudCategory,
    min: f64,
    max: f64,
) -> Result<CorrectedHumidity, IndexError> {
    for (field, value) in [("min_humidity", min), ("max_humidity", max)] {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(IndexError::invalid(field, format!("{} is outside 0..=100", value)));
        }
    }

    let corrected = CorrectedHumidity {
        min: min + f64::from(*tables.min_humidity.get(season, cloud)),
        max: max + f64::from(*tables.max_humidity.get(season, cloud)),
    };
    tracing::debug!(
        "Humidity {}..{} corrected to {}..{} ({} / {})",
        min,
        max,
        corrected.min,
        corrected.max,
        season,
        cloud
    );
    Ok(corrected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_adds_offsets() {
        let tables = ReferenceTables::default();
        let h = correct_humidity(&tables, Season::Spring, CloudCategory::Clear, 60.0, 85.0).unwrap();
        assert_eq!(h.min, 52.0);
        assert_eq!(h.max, 82.0);
        assert_eq!(h.mean(), 67.0);
    }

    #[test]
    fn test_correction_is_not_clamped() {
        let tables = ReferenceTables::default();
        let h = correct_humidity(&tables, Season::Spring, CloudCategory::Overcast, 98.0, 100.0)
            .unwrap();
        assert_eq!(h.max, 104.0);

        let h = correct_humidity(&tables, Season::Winter, CloudCategory::Clear, 5.0, 20.0).unwrap();
        assert_eq!(h.min, -7.0);
    }

    #[test]
    fn test_correction_defined_for_every_pair() {
        let tables = ReferenceTables::default();
        for season in Season::ALL {
            for cloud in CloudCategory::ALL {
                let h = correct_humidity(&tables, season, cloud, 50.0, 80.0).unwrap();
                assert!(h.min.is_finite() && h.max.is_finite());
            }
        }
    }

    #[test]
    fn test_correction_rejects_out_of_range_input() {
        let tables = ReferenceTables::default();
        assert!(correct_humidity(&tables, Season::Summer, CloudCategory::Few, -1.0, 80.0).is_err());
        assert!(correct_humidity(&tables, Season::Summer, CloudCategory::Few, 50.0, 100.5).is_err());
    }
}
