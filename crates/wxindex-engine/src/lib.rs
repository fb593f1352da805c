//! Weather advisory index engine
//!
//! Turns normalized forecast observations into comfort and advisory
//! indices: stargazing, surface wetness, laundry drying, outdoor exercise,
//! clothing and insect activity.

pub mod types;
pub mod tables;
pub mod humidity;
pub mod feel;
pub mod rain;
pub mod series;
pub mod indices;
pub mod engine;
pub mod provider;

pub use types::*;
pub use tables::ReferenceTables;
pub use humidity::CorrectedHumidity;
pub use rain::RainOdds;
pub use engine::{DerivedMetrics, IndexEngine, IndexReport};
pub use provider::{JsonFileSource, ObservationSource};
