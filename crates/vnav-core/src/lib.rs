//! Core vertical-navigation math utilities
//!
//! Includes:
//! - Units & conversions (knots to feet per minute, segment time/distance/fuel)
//! - Standard atmosphere and airspeed conversions
//! - Acceleration factor for constant-CAS / constant-Mach climbs
//! - Shared error type and solver configuration

pub mod atmosphere;
pub mod config;
pub mod error;

pub use atmosphere::{AccelFactorMode, AtmosphereModel, SpeedSchedule, StandardAtmosphere};
pub use config::PredictionConfig;
pub use error::{PredictionError, Result};

/// -------------------------
/// Units & Conversions
/// -------------------------

/// Knots -> feet per minute (6076.12 ft per nm / 60 min).
pub const KNOTS_TO_FPM: f64 = 101.268;

pub const MINUTES_PER_HOUR: f64 = 60.0;

pub fn knots_to_fpm(kt: f64) -> f64 { kt * KNOTS_TO_FPM }

/// Ground distance [nm] covered in `minutes` at `ground_speed_kt`.
pub fn distance_nm(ground_speed_kt: f64, minutes: f64) -> f64 {
    ground_speed_kt * minutes / MINUTES_PER_HOUR
}

/// Minutes needed to cover `distance_nm` at `ground_speed_kt`.
pub fn minutes_for_distance(distance_nm: f64, ground_speed_kt: f64) -> f64 {
    distance_nm / ground_speed_kt * MINUTES_PER_HOUR
}

/// Fuel [mass units] burned in `minutes` at an hourly `fuel_flow`.
pub fn fuel_burned(fuel_flow_per_hour: f64, minutes: f64) -> f64 {
    (fuel_flow_per_hour / MINUTES_PER_HOUR) * minutes
}
