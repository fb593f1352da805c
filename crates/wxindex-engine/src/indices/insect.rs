use crate::tables::ReferenceTables;
use crate::types::{IndexError, IndexKind, IndexResult, Level, Season};

/// Insect activity level, 1 (very low) to 5 (very high).
///
/// Winter is always 1; otherwise a linear score in minimum temperature and
/// corrected maximum humidity is banded.
pub fn insect_level(season: Season, min_temperature: f64, max_humidity: f64) -> Level {
    if season == Season::Winter {
        return Level::whole(1);
    }
    let score = -24.0 + 0.2 * min_temperature + 0.3 * max_humidity;
    let level = if score <= 0.0 {
        1
    } else if score <= 5.0 {
        2
    } else if score <= 8.0 {
        3
    } else if score <= 9.5 {
        4
    } else {
        5
    };
    Level::whole(level)
}

pub fn insect_index(
    tables: &ReferenceTables,
    season: Season,
    min_temperature: f64,
    max_humidity: f64,
) -> Result<IndexResult, IndexError> {
    let level = insect_level(season, min_temperature, max_humidity);
    let text = tables.insect.lookup(IndexKind::Insect, level)?;
    Ok(IndexResult::new(level, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_is_always_lowest() {
        let tables = ReferenceTables::default();
        let expected = tables.insect.get(Level::whole(1)).unwrap().to_string();
        for (t, rh) in [(-5.0, 20.0), (25.0, 100.0), (40.0, 130.0)] {
            let result = insect_index(&tables, Season::Winter, t, rh).unwrap();
            assert_eq!(result, IndexResult::new(Level::whole(1), expected.clone()));
        }
    }

    #[test]
    fn test_bands() {
        // score = -20 + 0.3 rh at a minimum of 20 °C
        let level = |rh: f64| insect_level(Season::Summer, 20.0, rh).value();
        assert_eq!(level(60.0), 1.0);
        assert_eq!(level(70.0), 2.0);
        assert_eq!(level(80.0), 2.0);
        assert_eq!(level(90.0), 3.0);
        assert_eq!(level(95.0), 4.0);
        assert_eq!(level(100.0), 5.0);
    }

    #[test]
    fn test_non_winter_seasons_share_the_formula() {
        for season in [Season::Spring, Season::Summer, Season::Autumn] {
            assert_eq!(insect_level(season, 28.0, 95.0), Level::whole(5));
            assert_eq!(insect_level(season, 5.0, 40.0), Level::whole(1));
        }
    }

    #[test]
    fn test_corrected_humidity_above_100() {
        assert_eq!(insect_level(Season::Summer, 10.0, 110.0), Level::whole(5));
    }

    #[test]
    fn test_index_text() {
        let tables = ReferenceTables::default();
        let result = insect_index(&tables, Season::Autumn, 22.0, 92.0).unwrap();
        // -24 + 4.4 + 27.6 = 8.0
        assert!(result.level >= Level::whole(3));
        assert_eq!(tables.insect.get(result.level), Some(result.advisory.as_str()));
    }
}
