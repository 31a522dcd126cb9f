//! Request and result records shared by the climb and level solvers.

use vnav_core::{AccelFactorMode, PredictionError, Result};

/// One climb step: climb `step_size_ft` from `initial_altitude_ft` at a fixed
/// N1, evaluated at the mid-step altitude.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimbStepRequest {
    pub initial_altitude_ft: f64,
    pub step_size_ft: f64,
    /// CAS target [kt] (speed limit and restrictions already applied)
    pub target_cas_kt: f64,
    /// Mach flown once above the crossover altitude
    pub target_mach: f64,
    /// Climb thrust setting [% N1]
    pub climb_n1_pct: f64,
    pub zero_fuel_weight_lb: f64,
    /// Fuel on board at the start of the step [lb]
    pub initial_fuel_weight_lb: f64,
    /// Headwind at mid-step altitude [kt]; tailwind is negative
    pub headwind_kt: f64,
    pub isa_dev_c: f64,
    pub tropopause_altitude_ft: f64,
}

impl ClimbStepRequest {
    pub fn mid_step_altitude(&self) -> f64 {
        self.initial_altitude_ft + self.step_size_ft / 2.0
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_finite(&[
            ("initial altitude", self.initial_altitude_ft),
            ("step size", self.step_size_ft),
            ("target CAS", self.target_cas_kt),
            ("target Mach", self.target_mach),
            ("climb N1", self.climb_n1_pct),
            ("zero fuel weight", self.zero_fuel_weight_lb),
            ("fuel weight", self.initial_fuel_weight_lb),
            ("headwind", self.headwind_kt),
            ("ISA deviation", self.isa_dev_c),
            ("tropopause altitude", self.tropopause_altitude_ft),
        ])?;
        require_positive("step size", self.step_size_ft)?;
        require_positive("climb N1", self.climb_n1_pct)?;
        require_speed_and_weight(
            self.target_cas_kt,
            self.target_mach,
            self.zero_fuel_weight_lb,
            self.initial_fuel_weight_lb,
        )
    }
}

/// One level step: fly `step_size_nm` at constant `altitude_ft`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelStepRequest {
    pub altitude_ft: f64,
    pub step_size_nm: f64,
    pub target_cas_kt: f64,
    pub target_mach: f64,
    pub zero_fuel_weight_lb: f64,
    pub initial_fuel_weight_lb: f64,
    pub headwind_kt: f64,
    pub isa_dev_c: f64,
}

impl LevelStepRequest {
    pub(crate) fn validate(&self) -> Result<()> {
        require_finite(&[
            ("altitude", self.altitude_ft),
            ("step size", self.step_size_nm),
            ("target CAS", self.target_cas_kt),
            ("target Mach", self.target_mach),
            ("zero fuel weight", self.zero_fuel_weight_lb),
            ("fuel weight", self.initial_fuel_weight_lb),
            ("headwind", self.headwind_kt),
            ("ISA deviation", self.isa_dev_c),
        ])?;
        require_positive("step size", self.step_size_nm)?;
        require_speed_and_weight(
            self.target_cas_kt,
            self.target_mach,
            self.zero_fuel_weight_lb,
            self.initial_fuel_weight_lb,
        )
    }
}

fn require_finite(values: &[(&str, f64)]) -> Result<()> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(PredictionError::invalid(format!("{name} is not finite ({v})"))),
        None => Ok(()),
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(PredictionError::invalid(format!("{name} must be positive, got {value}")))
    }
}

fn require_speed_and_weight(cas: f64, mach: f64, zfw: f64, fuel: f64) -> Result<()> {
    require_positive("target CAS", cas)?;
    require_positive("target Mach", mach)?;
    require_positive("zero fuel weight", zfw)?;
    if fuel < 0.0 {
        return Err(PredictionError::invalid(format!("fuel weight must not be negative, got {fuel}")));
    }
    Ok(())
}

/// Outcome of one solved segment. Always fully populated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentResult {
    /// Flight path angle [rad], 0 for level segments
    pub path_angle: f64,
    /// [ft/min], 0 for level segments
    pub vertical_speed: f64,
    /// Ground distance [nm]
    pub distance_traveled: f64,
    /// [lb]
    pub fuel_burned: f64,
    /// [min]
    pub time_elapsed: f64,
}

impl SegmentResult {
    /// Fuel left at the end of the segment, for feeding the next one.
    pub fn end_fuel_weight(&self, initial_fuel_weight: f64) -> f64 {
        initial_fuel_weight - self.fuel_burned
    }

    /// Average ground speed [kt].
    pub fn ground_speed(&self) -> f64 {
        self.distance_traveled / self.time_elapsed * vnav_core::MINUTES_PER_HOUR
    }
}

/// Climb result plus the solver state that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimbSolution {
    pub segment: SegmentResult,
    /// Whether the step was flown CAS-limited or Mach-limited
    pub speed_mode: AccelFactorMode,
    /// Fixed-point passes run before the mid-step weight settled
    pub iterations: u32,
}

/// Level result plus the engine operating point that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSolution {
    pub segment: SegmentResult,
    pub speed_mode: AccelFactorMode,
    /// N1 [%] holding the target speed
    pub n1_pct: f64,
    /// Total fuel flow [lb/h]
    pub fuel_flow_lb_per_hr: f64,
}
