//! Static reference tables shared by every index calculator.
//!
//! Season × cloud tables carry one field per key, so they are total by
//! construction. Advisory tables are keyed by level and are checked for
//! totality by [`ReferenceTables::validate`] when an engine is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{CloudCategory, IndexError, IndexKind, Level, Season};

/// One value per cloud category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudRow<T> {
    pub clear: T,
    pub few: T,
    pub scattered: T,
    pub broken: T,
    pub overcast: T,
}

impl<T> CloudRow<T> {
    pub fn get(&self, cloud: CloudCategory) -> &T {
        match cloud {
            CloudCategory::Clear => &self.clear,
            CloudCategory::Few => &self.few,
            CloudCategory::Scattered => &self.scattered,
            CloudCategory::Broken => &self.broken,
            CloudCategory::Overcast => &self.overcast,
        }
    }
}

/// One cloud row per season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonGrid<T> {
    pub spring: CloudRow<T>,
    pub summer: CloudRow<T>,
    pub autumn: CloudRow<T>,
    pub winter: CloudRow<T>,
}

impl<T> SeasonGrid<T> {
    pub fn row(&self, season: Season) -> &CloudRow<T> {
        match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
            Season::Winter => &self.winter,
        }
    }

    pub fn get(&self, season: Season, cloud: CloudCategory) -> &T {
        self.row(season).get(cloud)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryEntry {
    pub level: Level,
    pub text: String,
}

/// Advisory text keyed by index level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvisoryTable {
    entries: Vec<AdvisoryEntry>,
}

impl AdvisoryTable {
    pub fn new(entries: Vec<AdvisoryEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.level == level)
            .map(|e| e.text.as_str())
    }

    /// Advisory text for `level`, or a lookup miss naming the table.
    pub fn lookup(&self, kind: IndexKind, level: Level) -> Result<&str, IndexError> {
        self.get(level).ok_or_else(|| IndexError::missing(kind, level))
    }

    pub fn entries(&self) -> &[AdvisoryEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutdoorEntry {
    pub product: u8,
    pub level: Level,
    pub text: String,
}

/// Outdoor suitability keyed by the product of the five comfort sub-scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutdoorTable {
    entries: Vec<OutdoorEntry>,
}

impl OutdoorTable {
    pub fn new(entries: Vec<OutdoorEntry>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, product: u8) -> Result<(Level, &str), IndexError> {
        self.entries
            .iter()
            .find(|e| e.product == product)
            .map(|e| (e.level, e.text.as_str()))
            .ok_or_else(|| IndexError::missing(IndexKind::Outdoor, format!("product {}", product)))
    }
}

/// Levels each calculator can produce; every one must have advisory text.
pub const WETNESS_LEVELS: [Level; 6] = [
    Level::whole(0),
    Level::whole(1),
    Level::whole(2),
    Level::whole(3),
    Level::whole(4),
    Level::whole(5),
];
pub const FIVE_LEVELS: [Level; 5] = [
    Level::whole(1),
    Level::whole(2),
    Level::whole(3),
    Level::whole(4),
    Level::whole(5),
];
pub const CLOTHING_LEVELS: [Level; 8] = [
    Level::whole(1),
    Level::whole(2),
    Level::from_halves(5),
    Level::whole(3),
    Level::from_halves(7),
    Level::whole(4),
    Level::from_halves(9),
    Level::whole(5),
];
/// Every attainable product of five sub-scores in 0..=2
pub const OUTDOOR_PRODUCTS: [u8; 7] = [0, 1, 2, 4, 8, 16, 32];

/// All reference data the engine reads, bundled or loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    /// Offset added to the forecast minimum humidity
    pub min_humidity: SeasonGrid<i32>,
    /// Offset added to the forecast maximum humidity
    pub max_humidity: SeasonGrid<i32>,
    /// Cloud term of the drying regression
    pub cloud_weight: CloudRow<f64>,
    pub stargazing: CloudRow<String>,
    pub insect: AdvisoryTable,
    pub clothing: AdvisoryTable,
    pub wetness: AdvisoryTable,
    pub drying: AdvisoryTable,
    pub outdoor: OutdoorTable,
}

impl ReferenceTables {
    /// Parse tables from TOML and check them for totality.
    pub fn from_toml_str(contents: &str) -> Result<Self, IndexError> {
        let tables: Self =
            toml::from_str(contents).map_err(|e| IndexError::TableLoad(e.to_string()))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Read a TOML table file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IndexError::TableLoad(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded reference tables from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, IndexError> {
        toml::to_string_pretty(self).map_err(|e| IndexError::TableLoad(e.to_string()))
    }

    /// Check that every level a calculator can produce resolves to text.
    pub fn validate(&self) -> Result<(), IndexError> {
        let checks: [(IndexKind, &AdvisoryTable, &[Level]); 4] = [
            (IndexKind::Wetness, &self.wetness, &WETNESS_LEVELS),
            (IndexKind::Drying, &self.drying, &FIVE_LEVELS),
            (IndexKind::Insect, &self.insect, &FIVE_LEVELS),
            (IndexKind::Clothing, &self.clothing, &CLOTHING_LEVELS),
        ];
        for (kind, table, levels) in checks {
            for level in levels {
                table.lookup(kind, *level)?;
            }
        }
        for product in OUTDOOR_PRODUCTS {
            self.outdoor.lookup(product)?;
        }
        for cloud in CloudCategory::ALL {
            if !self.cloud_weight.get(cloud).is_finite() {
                return Err(IndexError::TableLoad(format!(
                    "cloud_weight.{} is not a finite number",
                    cloud
                )));
            }
        }
        Ok(())
    }
}

fn advisory(entries: &[(Level, &str)]) -> AdvisoryTable {
    AdvisoryTable::new(
        entries
            .iter()
            .map(|(level, text)| AdvisoryEntry {
                level: *level,
                text: (*text).to_string(),
            })
            .collect(),
    )
}

fn row<T: Copy>(values: [T; 5]) -> CloudRow<T> {
    CloudRow {
        clear: values[0],
        few: values[1],
        scattered: values[2],
        broken: values[3],
        overcast: values[4],
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            min_humidity: SeasonGrid {
                spring: row([-8, -5, -2, 0, 3]),
                summer: row([-6, -4, -2, 1, 4]),
                autumn: row([-10, -7, -4, -1, 2]),
                winter: row([-12, -8, -5, -2, 2]),
            },
            max_humidity: SeasonGrid {
                spring: row([-3, -2, 0, 2, 4]),
                summer: row([-2, -1, 0, 2, 3]),
                autumn: row([-5, -3, -1, 1, 3]),
                winter: row([-6, -4, -2, 0, 3]),
            },
            cloud_weight: row([4.0, 3.0, 2.0, 1.0, 0.0]),
            stargazing: CloudRow {
                clear: "Excellent: clear skies, ideal for stargazing".to_string(),
                few: "Good: a few clouds, most of the sky is visible".to_string(),
                scattered: "Fair: scattered clouds, visibility comes and goes".to_string(),
                broken: "Poor: broken cloud, only small gaps are visible".to_string(),
                overcast: "Unsuitable: overcast, no stars visible".to_string(),
            },
            insect: advisory(&[
                (Level::whole(1), "Very low: few insects are active"),
                (Level::whole(2), "Low: occasional mosquitoes near water"),
                (Level::whole(3), "Moderate: use repellent outdoors in the evening"),
                (Level::whole(4), "High: use repellent and keep screens closed"),
                (Level::whole(5), "Very high: avoid damp, shaded areas at dusk"),
            ]),
            clothing: advisory(&[
                (Level::whole(1), "Very hot: short sleeves and light, breathable fabrics"),
                (Level::whole(2), "Hot: short sleeves, shorts or a thin skirt"),
                (Level::from_halves(5), "Warm: short sleeves, a thin layer for air-conditioned rooms"),
                (Level::whole(3), "Mild: long sleeves or a light shirt"),
                (Level::from_halves(7), "Cool: a light jacket or sweater"),
                (Level::whole(4), "Chilly: jacket over a sweater"),
                (Level::from_halves(9), "Cold: coat and warm layers"),
                (Level::whole(5), "Very cold: heavy coat, hat and gloves"),
            ]),
            wetness: advisory(&[
                (Level::whole(0), "Dry: no slip advisory"),
                (Level::whole(1), "Slightly wet: light rain may dampen roads"),
                (Level::whole(2), "Wet: take care on smooth surfaces"),
                (Level::whole(3), "Very wet: roads and stairs are slippery"),
                (Level::whole(4), "Slippery: standing water or damp floors, walk carefully"),
                (Level::whole(5), "Significant condensation: floors and walls are sweating"),
            ]),
            drying: advisory(&[
                (Level::whole(1), "Unsuitable: strong gusts or condensation, dry indoors"),
                (Level::whole(2), "Poor: damp air, laundry will not dry outdoors"),
                (Level::whole(3), "Fair: drying is slow, allow extra time"),
                (Level::whole(4), "Good: laundry dries within the day"),
                (Level::whole(5), "Excellent: ideal drying conditions"),
            ]),
            outdoor: OutdoorTable::new(
                [
                    (0, Level::whole(1), "Unsuitable: exercise indoors today"),
                    (1, Level::whole(2), "Poor: keep outdoor sessions short and easy"),
                    (2, Level::whole(2), "Poor: keep outdoor sessions short and easy"),
                    (4, Level::whole(3), "Fair: light outdoor exercise is fine"),
                    (8, Level::whole(4), "Good: comfortable for most outdoor exercise"),
                    (16, Level::whole(4), "Good: comfortable for most outdoor exercise"),
                    (32, Level::whole(5), "Excellent: ideal conditions for outdoor exercise"),
                ]
                .into_iter()
                .map(|(product, level, text)| OutdoorEntry {
                    product,
                    level,
                    text: text.to_string(),
                })
                .collect(),
            ),
        }
    }
}
