//! Net effective temperature: an empirical "real feel" combining air
//! temperature, relative humidity and wind.

use crate::types::IndexError;

/// Net effective temperature (°C) for temperature `t` (°C), relative
/// humidity `rh` (%) and wind speed `v` (km/h).
///
/// Full precision is returned; round only for display.
pub fn net_temperature(t: f64, rh: f64, v: f64) -> Result<f64, IndexError> {
    if !t.is_finite() {
        return Err(IndexError::invalid("temperature", "must be a finite number"));
    }
    if !rh.is_finite() {
        return Err(IndexError::invalid("humidity", "must be a finite number"));
    }
    if !v.is_finite() || v < 0.0 {
        return Err(IndexError::invalid(
            "wind_speed",
            format!("{} is not a non-negative speed", v),
        ));
    }

    let wind_term = 1.0 / (1.76 + 1.4 * v.powf(0.75));
    let denominator = 0.68 - 0.0014 * rh + wind_term;
    let net = 37.0 - (37.0 - t) / denominator - 0.29 * t * (1.0 - 0.01 * rh);
    if !net.is_finite() {
        return Err(IndexError::invalid(
            "humidity",
            format!("{} leaves the net temperature undefined", rh),
        ));
    }
    Ok(net)
}

/// Round to `decimals` places for presentation.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
