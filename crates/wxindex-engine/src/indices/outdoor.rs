use serde::{Deserialize, Serialize};

use crate::rain::RainOdds;
use crate::tables::ReferenceTables;
use crate::types::{CloudCategory, IndexError, IndexResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutdoorInputs {
    pub cloud: CloudCategory,
    pub rain: RainOdds,
    /// Net effective temperature (°C)
    pub net: f64,
    pub dew_point: f64,
    pub wind: f64,
    /// AQI-like pollution scalar
    pub pollution: f64,
}

/// Five comfort sub-scores, each 0 (bad), 1 (tolerable) or 2 (good)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdoorScores {
    pub sky: u8,
    pub thermal: u8,
    pub dew_point: u8,
    pub wind: u8,
    pub air_quality: u8,
}

impl OutdoorScores {
    pub fn from_inputs(inputs: &OutdoorInputs) -> Self {
        // A clear sky scores the same as likely light rain
        let sky = if inputs.rain.moderate >= 0.5 {
            0
        } else if inputs.cloud == CloudCategory::Clear || inputs.rain.light > 0.5 {
            1
        } else {
            2
        };

        let thermal = if inputs.net >= 26.63 || inputs.net <= 3.70 {
            0
        } else if inputs.net >= 24.07 || inputs.net <= 13.22 {
            1
        } else {
            2
        };

        Self {
            sky,
            thermal,
            dew_point: band(inputs.dew_point, 25.0, 22.0),
            wind: band(inputs.wind, 12.0, 9.0),
            air_quality: band(inputs.pollution, 150.0, 75.0),
        }
    }

    /// Multiplicative combination; any zero vetoes the rest.
    pub fn product(&self) -> u8 {
        self.sky * self.thermal * self.dew_point * self.wind * self.air_quality
    }
}

/// 0 at or above `worst`, 1 at or above `poor`, else 2.
fn band(value: f64, worst: f64, poor: f64) -> u8 {
    if value >= worst {
        0
    } else if value >= poor {
        1
    } else {
        2
    }
}

pub fn outdoor_index(tables: &ReferenceTables, inputs: &OutdoorInputs) -> Result<IndexResult, IndexError> {
    let scores = OutdoorScores::from_inputs(inputs);
    let product = scores.product();
    tracing::debug!("Outdoor scores {:?} -> {}", scores, product);
    let (level, text) = tables.outdoor.lookup(product)?;
    Ok(IndexResult::new(level, text))
}
