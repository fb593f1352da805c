use crate::rain::RainOdds;
use crate::tables::ReferenceTables;
use crate::types::{Condensation, IndexError, IndexKind, IndexResult, Level};

/// Probability at which an intensity counts as expected
const LIKELY: f64 = 0.5;

/// Surface wetness level, 0 (dry) to 5 (significant condensation).
///
/// Strong condensation always yields 5. Slight condensation yields 5 with
/// likely torrential rain and 4 with any other likely rain. Without
/// condensation the heaviest likely intensity wins, torrential mapping to 4.
/// Every remaining case is level 0.
pub fn wetness_level(rain: &RainOdds, condensation: Condensation) -> Level {
    let level = match condensation {
        Condensation::Strong => 5,
        Condensation::Slight => {
            if rain.torrential >= LIKELY {
                5
            } else if rain.light >= LIKELY || rain.moderate >= LIKELY || rain.heavy >= LIKELY {
                4
            } else {
                0
            }
        }
        Condensation::None => {
            if rain.torrential >= LIKELY {
                4
            } else if rain.heavy >= LIKELY {
                3
            } else if rain.moderate >= LIKELY {
                2
            } else if rain.light >= LIKELY {
                1
            } else {
                0
            }
        }
    };
    Level::whole(level)
}

pub fn wetness_index(
    tables: &ReferenceTables,
    rain: &RainOdds,
    condensation: Condensation,
) -> Result<IndexResult, IndexError> {
    let level = wetness_level(rain, condensation);
    tracing::debug!("Wetness level {} (condensation {:?})", level, condensation);
    let text = tables.wetness.lookup(IndexKind::Wetness, level)?;
    Ok(IndexResult::new(level, text))
}
