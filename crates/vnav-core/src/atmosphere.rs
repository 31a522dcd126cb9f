//! Standard atmosphere, airspeed conversions and the climb acceleration factor.
//!
//! Everything works in ratios to sea-level ISA (θ = T/T0, δ = p/p0), altitude
//! in feet, temperature deviation in °C and speeds in knots.

use serde::{Deserialize, Serialize};

/// Sea-level ISA temperature [K]
pub const ISA_SEA_LEVEL_TEMP_K: f64 = 288.15;
/// ISA temperature above the tropopause [K]
pub const ISA_TROPOPAUSE_TEMP_K: f64 = 216.65;
/// Standard tropopause altitude [ft]
pub const ISA_TROPOPAUSE_FT: f64 = 36_089.24;
/// Tropospheric lapse rate [K/ft] (6.5 K/km)
pub const ISA_LAPSE_RATE_K_PER_FT: f64 = 0.001_981_2;
/// δ = θ^n in the troposphere, n = g / (R·L)
pub const PRESSURE_EXPONENT: f64 = 5.255_88;
/// Sea-level speed of sound [kt]
pub const SEA_LEVEL_SPEED_OF_SOUND_KT: f64 = 661.4786;

/// Which speed is held constant during a climb; selects the acceleration
/// factor formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelFactorMode {
    ConstantCas,
    ConstantMach,
}

/// Atmosphere and speed-conversion provider.
///
/// Implement this to drive the solvers with a non-standard atmosphere.
pub trait AtmosphereModel {
    /// θ at `altitude_ft` with an ISA deviation of `isa_dev_c`.
    fn temperature_ratio(&self, altitude_ft: f64, isa_dev_c: f64) -> f64;
    /// δ from θ.
    ///
    /// The standard implementation is `θ^5.25588`, the tropospheric relation.
    /// θ is constant above the tropopause, so δ stops falling there: two
    /// stratospheric altitudes with the same ISA deviation give the same δ.
    fn pressure_ratio(&self, theta: f64) -> f64;
    /// θ₂, total (ram) temperature ratio at the engine inlet.
    fn inlet_temperature_correction(&self, theta: f64, mach: f64) -> f64;
    /// δ₂, total pressure ratio at the engine inlet.
    fn inlet_pressure_correction(&self, delta: f64, mach: f64) -> f64;
    fn cas_to_mach(&self, cas: f64, delta: f64) -> f64;
    fn cas_to_eas(&self, cas: f64, delta: f64) -> f64;
    fn cas_to_tas(&self, cas: f64, theta: f64, delta: f64) -> f64;
    fn mach_to_eas(&self, mach: f64, delta: f64) -> f64;
    fn mach_to_tas(&self, mach: f64, theta: f64) -> f64;
    /// 1 + (V/g)·dV/dh for a climb holding the speed named by `mode`.
    fn acceleration_factor(
        &self,
        mach: f64,
        altitude_ft: f64,
        isa_dev_c: f64,
        above_tropopause: bool,
        mode: AccelFactorMode,
    ) -> f64;
}

/// ICAO standard atmosphere (troposphere + isothermal lower stratosphere).
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardAtmosphere;

/// ISA temperature [K] at `altitude_ft`, no deviation applied.
pub fn isa_temperature_k(altitude_ft: f64) -> f64 {
    (ISA_SEA_LEVEL_TEMP_K - ISA_LAPSE_RATE_K_PER_FT * altitude_ft).max(ISA_TROPOPAUSE_TEMP_K)
}

impl StandardAtmosphere {
    /// ISA altitude [ft] at which `cas` and `mach` describe the same speed.
    /// Below it a CAS schedule is Mach-limited by nothing; above it the Mach
    /// limit governs. Only meaningful for crossovers in the troposphere.
    pub fn crossover_altitude(cas: f64, mach: f64) -> f64 {
        let impact_cas = (1.0 + 0.2 * (cas / SEA_LEVEL_SPEED_OF_SOUND_KT).powi(2)).powf(3.5) - 1.0;
        let impact_mach = (1.0 + 0.2 * mach * mach).powf(3.5) - 1.0;
        let delta = impact_cas / impact_mach;
        let theta = delta.powf(1.0 / PRESSURE_EXPONENT);
        (1.0 - theta) * ISA_SEA_LEVEL_TEMP_K / ISA_LAPSE_RATE_K_PER_FT
    }
}

impl AtmosphereModel for StandardAtmosphere {
    fn temperature_ratio(&self, altitude_ft: f64, isa_dev_c: f64) -> f64 {
        (isa_temperature_k(altitude_ft) + isa_dev_c) / ISA_SEA_LEVEL_TEMP_K
    }

    fn pressure_ratio(&self, theta: f64) -> f64 {
        theta.powf(PRESSURE_EXPONENT)
    }

    fn inlet_temperature_correction(&self, theta: f64, mach: f64) -> f64 {
        theta * (1.0 + 0.2 * mach * mach)
    }

    fn inlet_pressure_correction(&self, delta: f64, mach: f64) -> f64 {
        delta * (1.0 + 0.2 * mach * mach).powf(3.5)
    }

    fn cas_to_mach(&self, cas: f64, delta: f64) -> f64 {
        // impact pressure at sea level for this CAS, rescaled to the local static pressure
        let qc_p0 = (1.0 + 0.2 * (cas / SEA_LEVEL_SPEED_OF_SOUND_KT).powi(2)).powf(3.5) - 1.0;
        let qc_p = qc_p0 / delta;
        (5.0 * ((qc_p + 1.0).powf(1.0 / 3.5) - 1.0)).sqrt()
    }

    fn cas_to_eas(&self, cas: f64, delta: f64) -> f64 {
        SEA_LEVEL_SPEED_OF_SOUND_KT * self.cas_to_mach(cas, delta) * delta.sqrt()
    }

    fn cas_to_tas(&self, cas: f64, theta: f64, delta: f64) -> f64 {
        SEA_LEVEL_SPEED_OF_SOUND_KT * theta.sqrt() * self.cas_to_mach(cas, delta)
    }

    fn mach_to_eas(&self, mach: f64, delta: f64) -> f64 {
        SEA_LEVEL_SPEED_OF_SOUND_KT * mach * delta.sqrt()
    }

    fn mach_to_tas(&self, mach: f64, theta: f64) -> f64 {
        SEA_LEVEL_SPEED_OF_SOUND_KT * mach * theta.sqrt()
    }

    fn acceleration_factor(
        &self,
        mach: f64,
        altitude_ft: f64,
        isa_dev_c: f64,
        above_tropopause: bool,
        mode: AccelFactorMode,
    ) -> f64 {
        let isa_temp = isa_temperature_k(altitude_ft);
        let temp_ratio = isa_temp / (isa_temp + isa_dev_c);
        let m2 = mach * mach;

        match mode {
            AccelFactorMode::ConstantCas => {
                let phi = if m2 < 1e-12 {
                    1.0
                } else {
                    let k = 1.0 + 0.2 * m2;
                    (k.powf(3.5) - 1.0) / (0.7 * m2 * k.powf(2.5))
                };
                if above_tropopause {
                    1.0 + 0.7 * m2 * phi
                } else {
                    1.0 + 0.7 * m2 * (phi - 0.190_263 * temp_ratio)
                }
            }
            AccelFactorMode::ConstantMach => {
                if above_tropopause {
                    1.0
                } else {
                    1.0 - 0.133_184 * m2 * temp_ratio
                }
            }
        }
    }
}

/// The speed actually flown once a CAS target and a Mach limit are reconciled
/// at a given θ/δ.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedSchedule {
    pub mode: AccelFactorMode,
    pub mach: f64,
    pub eas: f64,
    pub tas: f64,
}

impl SpeedSchedule {
    /// Fly `cas` unless it converts to a Mach above `mach_limit` (i.e. above
    /// the crossover altitude), in which case fly `mach_limit`.
    pub fn select<A: AtmosphereModel + ?Sized>(
        atmosphere: &A,
        cas: f64,
        mach_limit: f64,
        theta: f64,
        delta: f64,
    ) -> Self {
        let mach = atmosphere.cas_to_mach(cas, delta);
        if mach > mach_limit {
            Self {
                mode: AccelFactorMode::ConstantMach,
                mach: mach_limit,
                eas: atmosphere.mach_to_eas(mach_limit, delta),
                tas: atmosphere.mach_to_tas(mach_limit, theta),
            }
        } else {
            Self {
                mode: AccelFactorMode::ConstantCas,
                mach,
                eas: atmosphere.cas_to_eas(cas, delta),
                tas: atmosphere.cas_to_tas(cas, theta, delta),
            }
        }
    }
}
