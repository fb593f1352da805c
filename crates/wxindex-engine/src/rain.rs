use serde::{Deserialize, Serialize};

use crate::types::IndexError;

/// Canonical sample count: a 3×3 grid around the site plus the site itself
pub const RAIN_SAMPLE_COUNT: usize = 10;

/// Accumulation thresholds (mm) for light, moderate, heavy and torrential rain
pub const LIGHT_RAIN_MM: f64 = 1.0;
pub const MODERATE_RAIN_MM: f64 = 10.0;
pub const HEAVY_RAIN_MM: f64 = 25.0;
pub const TORRENTIAL_RAIN_MM: f64 = 50.0;

/// Fraction of rainfall samples above each intensity threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RainOdds {
    pub light: f64,
    pub moderate: f64,
    pub heavy: f64,
    pub torrential: f64,
}

/// Aggregate rainfall samples into per-intensity probabilities.
///
/// A sample counts towards a threshold only when it strictly exceeds it.
pub fn rain_odds(samples: &[f64]) -> Result<RainOdds, IndexError> {
    if samples.is_empty() {
        return Err(IndexError::invalid("rainfall", "at least one sample is required"));
    }
    if let Some(bad) = samples.iter().find(|s| !s.is_finite() || **s < 0.0) {
        return Err(IndexError::invalid(
            "rainfall",
            format!("{} is not a valid accumulation", bad),
        ));
    }
    if samples.len() != RAIN_SAMPLE_COUNT {
        tracing::warn!(
            "Expected {} rainfall samples, got {}",
            RAIN_SAMPLE_COUNT,
            samples.len()
        );
    }

    let total = samples.len() as f64;
    let share = |threshold: f64| samples.iter().filter(|s| **s > threshold).count() as f64 / total;

    let odds = RainOdds {
        light: share(LIGHT_RAIN_MM),
        moderate: share(MODERATE_RAIN_MM),
        heavy: share(HEAVY_RAIN_MM),
        torrential: share(TORRENTIAL_RAIN_MM),
    };
    tracing::debug!("Rain odds: {:?}", odds);
    Ok(odds)
}
