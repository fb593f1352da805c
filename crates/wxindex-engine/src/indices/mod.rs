//! The six advisory index calculators.
//!
//! Each calculator splits into a pure level decision and an advisory
//! lookup against the reference tables.

pub mod clothing;
pub mod drying;
pub mod insect;
pub mod outdoor;
pub mod stargazing;
pub mod wetness;

pub use clothing::{clothing_index, clothing_level};
pub use drying::{drying_index, drying_level, drying_score, DryingInputs};
pub use insect::{insect_index, insect_level};
pub use outdoor::{outdoor_index, OutdoorInputs, OutdoorScores};
pub use stargazing::{stargazing_outlook, NightSky, StarAdvisory};
pub use wetness::{wetness_index, wetness_level};
