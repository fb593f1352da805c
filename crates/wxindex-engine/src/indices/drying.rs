use crate::tables::ReferenceTables;
use crate::types::{CloudCategory, IndexError, IndexKind, IndexResult, Level, Season};

/// Gust speed at which laundry cannot be hung out
pub const GUST_LIMIT: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryingInputs {
    pub gust: f64,
    pub wetness: Level,
    pub season: Season,
    pub cloud: CloudCategory,
    /// Mean corrected humidity (%)
    pub humidity: f64,
    pub wind: f64,
    pub max_temperature: f64,
}

/// Empirical drying score; higher dries faster.
pub fn drying_score(tables: &ReferenceTables, inputs: &DryingInputs) -> f64 {
    43.547 + 0.2 * inputs.max_temperature - 0.8 * inputs.humidity
        + 0.5 * inputs.wind
        + 1.6 * tables.cloud_weight.get(inputs.cloud)
}

pub fn drying_level(tables: &ReferenceTables, inputs: &DryingInputs) -> Level {
    if inputs.gust >= GUST_LIMIT || inputs.wetness == Level::whole(5) {
        return Level::whole(1);
    }
    if inputs.wetness == Level::whole(4) {
        return Level::whole(2);
    }

    let score = drying_score(tables, inputs);
    let (fair, good) = match inputs.season {
        Season::Spring | Season::Summer => (-5.0, 0.0),
        Season::Autumn | Season::Winter => (3.0, 8.0),
    };
    tracing::debug!("Drying score {:.3} ({})", score, inputs.season);
    if score <= fair {
        Level::whole(3)
    } else if score <= good {
        Level::whole(4)
    } else {
        Level::whole(5)
    }
}

pub fn drying_index(tables: &ReferenceTables, inputs: &DryingInputs) -> Result<IndexResult, IndexError> {
    let level = drying_level(tables, inputs);
    let text = tables.drying.lookup(IndexKind::Drying, level)?;
    Ok(IndexResult::new(level, text))
}
