use crate::tables::ReferenceTables;
use crate::types::{IndexError, IndexKind, IndexResult, Level};

/// Clothing level from the net effective temperature, hot (1) to cold (5).
pub fn clothing_level(net: f64) -> Level {
    let halves = if net >= 27.38 {
        2
    } else if net >= 26.63 {
        4
    } else if net >= 24.07 {
        5
    } else if net >= 18.00 {
        6
    } else if net > 13.22 {
        7
    } else if net > 3.70 {
        8
    } else if net > 0.63 {
        9
    } else {
        10
    };
    Level::from_halves(halves)
}

pub fn clothing_index(tables: &ReferenceTables, net: f64) -> Result<IndexResult, IndexError> {
    let level = clothing_level(net);
    let text = tables.clothing.lookup(IndexKind::Clothing, level)?;
    Ok(IndexResult::new(level, text))
}
