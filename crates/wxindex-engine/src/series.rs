//! Helpers over 3-hourly forecast series.
//!
//! Series start at 23:00 and hold 16 slots:
//! 0 23:00, 1 02:00, 2 05:00, 3 08:00, 4 11:00, 5 14:00, 6 17:00, 7 20:00,
//! 8 23:00, 9 02:00, 10 05:00, 11 08:00, 12 11:00, 13 14:00, 14 17:00, 15 20:00.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::types::{CloudCategory, Condensation, IndexError};

pub const FORECAST_SLOTS: usize = 16;
/// 17:00 to 17:00 the next day
pub const DAY_WINDOW: Range<usize> = 6..15;
/// 08:00 to 17:00 the next day
pub const DAYTIME_WINDOW: Range<usize> = 11..15;
/// 20:00
pub const EVENING_SLOT: usize = 7;
/// 23:00
pub const LATE_SLOT: usize = 8;

fn window<'a, T>(series: &'a [T], range: Range<usize>, field: &'static str) -> Result<&'a [T], IndexError> {
    series.get(range.clone()).ok_or_else(|| {
        IndexError::invalid(
            field,
            format!(
                "{} slots given, the forecast window needs {}",
                series.len(),
                range.end
            ),
        )
    })
}

/// Cloud samples covering the 17:00 to 17:00 day window.
pub fn day_window(clouds: &[CloudCategory]) -> Result<&[CloudCategory], IndexError> {
    window(clouds, DAY_WINDOW, "clouds")
}

/// Most frequent category; ties go to the more overcast one.
pub fn modal_cloud(clouds: &[CloudCategory]) -> Result<CloudCategory, IndexError> {
    let mut counts = [0usize; 5];
    for cloud in clouds {
        counts[*cloud as usize] += 1;
    }
    CloudCategory::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(cloud, count)| (*count, **cloud))
        .map(|(cloud, _)| *cloud)
        .ok_or_else(|| IndexError::invalid("clouds", "at least one cloud sample is required"))
}

/// Detect wall sweating from paired dew point and temperature series.
///
/// Over the day window, a dew point more than 0.5 °C above the air
/// temperature is strong condensation; within (-1, 0.5) it is slight.
pub fn detect_condensation(dew_points: &[f64], temperatures: &[f64]) -> Result<Condensation, IndexError> {
    let dew = window(dew_points, DAY_WINDOW, "dew_points")?;
    let temp = window(temperatures, DAY_WINDOW, "temperatures")?;

    let mut condensation = Condensation::None;
    for (d, t) in dew.iter().zip(temp) {
        let spread = d - t;
        if !spread.is_finite() {
            return Err(IndexError::invalid("dew_points", "must be finite numbers"));
        }
        if spread > 0.5 {
            return Ok(Condensation::Strong);
        }
        if spread > -1.0 && spread < 0.5 {
            condensation = Condensation::Slight;
        }
    }
    Ok(condensation)
}

/// Mean dew point over the 08:00 to 17:00 daytime window.
pub fn daytime_dew_point(dew_points: &[f64]) -> Result<f64, IndexError> {
    let daytime = window(dew_points, DAYTIME_WINDOW, "dew_points")?;
    Ok(daytime.iter().sum::<f64>() / daytime.len() as f64)
}

/// Wind speed from its u (eastward) and v (northward) components.
pub fn wind_speed(u: f64, v: f64) -> f64 {
    u.hypot(v)
}

/// Meteorological bearing (direction the wind blows from) in degrees.
pub fn wind_bearing(u: f64, v: f64) -> f64 {
    (270.0 - v.atan2(u).to_degrees()).rem_euclid(360.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    /// Bucket a bearing in degrees into one of eight points.
    pub fn from_bearing(bearing: f64) -> Result<Self, IndexError> {
        if !bearing.is_finite() || !(0.0..=360.0).contains(&bearing) {
            return Err(IndexError::invalid(
                "wind_bearing",
                format!("{} is outside 0..=360", bearing),
            ));
        }
        let point = match bearing {
            b if b > 22.5 && b <= 67.5 => Self::NE,
            b if b > 67.5 && b <= 112.5 => Self::E,
            b if b > 112.5 && b <= 157.5 => Self::SE,
            b if b > 157.5 && b <= 202.5 => Self::S,
            b if b > 202.5 && b <= 247.5 => Self::SW,
            b if b > 247.5 && b <= 292.5 => Self::W,
            b if b > 292.5 && b <= 327.5 => Self::NW,
            _ => Self::N,
        };
        Ok(point)
    }
}
