//! Effective ("feels like") temperature.
//!
//! The adjustments run in a fixed order over a running value that starts at
//! the air temperature. Every guard looks at the raw air temperature, so the
//! steps never influence each other's applicability.

/// Heat amplification applies strictly above these.
pub const HEAT_MIN_TEMP_C: f64 = 20.0;
pub const HEAT_MIN_HUMIDITY: f64 = 60.0;

/// Wind chill applies strictly above this speed.
pub const CHILL_MIN_WIND_KPH: f64 = 5.0;
pub const COLD_CHILL_CEILING_C: f64 = 15.0;
pub const COOL_CHILL_CEILING_C: f64 = 25.0;
const WIND_EXPONENT: f64 = 0.16;

pub const DAMP_COLD_MAX_TEMP_C: f64 = 10.0;
pub const DAMP_COLD_MIN_HUMIDITY: f64 = 70.0;

#[derive(Debug, Clone, Copy)]
struct Conditions {
    temp_c: f64,
    humidity_percent: f64,
    wind_kph: f64,
}

type Adjustment = fn(&Conditions, f64) -> f64;

const PIPELINE: [Adjustment; 4] = [heat_amplification, cold_wind_chill, cool_wind_chill, damp_cold];

/// Derive the effective temperature. Inputs are assumed range-checked.
pub fn compute_effective_temperature(temp_c: f64, humidity_percent: f64, wind_kph: f64) -> f64 {
    let conditions = Conditions { temp_c, humidity_percent, wind_kph };
    PIPELINE.iter().fold(temp_c, |running, step| step(&conditions, running))
}

fn heat_amplification(c: &Conditions, running: f64) -> f64 {
    if c.temp_c > HEAT_MIN_TEMP_C && c.humidity_percent > HEAT_MIN_HUMIDITY {
        let heat_adj = ((c.humidity_percent - HEAT_MIN_HUMIDITY) / 20.0)
            * ((c.temp_c - HEAT_MIN_TEMP_C) / 10.0);
        running + heat_adj.max(0.0)
    } else {
        running
    }
}

fn cold_wind_chill(c: &Conditions, running: f64) -> f64 {
    if c.wind_kph > CHILL_MIN_WIND_KPH && c.temp_c < COLD_CHILL_CEILING_C {
        let chill = c.wind_kph.powf(WIND_EXPONENT) * ((COLD_CHILL_CEILING_C - c.temp_c) / 20.0);
        running - (chill * 1.5).max(0.0)
    } else {
        running
    }
}

fn cool_wind_chill(c: &Conditions, running: f64) -> f64 {
    let in_band = c.temp_c >= COLD_CHILL_CEILING_C && c.temp_c < COOL_CHILL_CEILING_C;
    if c.wind_kph > CHILL_MIN_WIND_KPH && in_band {
        let chill = c.wind_kph.powf(WIND_EXPONENT) * ((COOL_CHILL_CEILING_C - c.temp_c) / 25.0);
        running - (chill * 0.8).max(0.0)
    } else {
        running
    }
}

// No floor here, unlike the other steps.
fn damp_cold(c: &Conditions, running: f64) -> f64 {
    if c.temp_c < DAMP_COLD_MAX_TEMP_C && c.humidity_percent > DAMP_COLD_MIN_HUMIDITY {
        running - (c.humidity_percent - DAMP_COLD_MIN_HUMIDITY) / 50.0
    } else {
        running
    }
}
