//! vnav-predictions
//!
//! Segment performance solvers for a vertical-navigation prediction engine.
//! - **Climb step**: climb through an altitude band at a fixed N1. Fixed-point
//!   iteration on the mid-step weight, CAS-limited or Mach-limited depending
//!   on which side of the crossover altitude the mid-step point falls.
//! - **Level step**: cover a ground distance at constant altitude with
//!   thrust = drag. Closed form via an inverse engine-table lookup.
//!
//! Both produce a [`SegmentResult`] (path angle, vertical speed, distance,
//! fuel, time) or fail with a [`PredictionError`]; nothing is carried between
//! calls. A profile builder chains calls, feeding each step's remaining fuel
//! into the next request.
//!
//! Conventions:
//! - Altitude in feet, speeds in knots, vertical speed in ft/min.
//! - Distance in nautical miles, time in minutes, weights and fuel in lb.
//! - Headwind is positive, tailwind negative.
//!
//! The models are generic so any [`AtmosphereModel`], [`EngineModel`] and
//! [`FlightModel`] can be plugged in; [`solve_climb_step`] and
//! [`solve_level_step`] use a process-wide predictor built from the defaults.

use once_cell::sync::Lazy;
use vnav_core::{AtmosphereModel, PredictionConfig, StandardAtmosphere};
use vnav_models::{A320FlightModel, EngineModel, FlightModel, TableEngine};

mod climb;
mod level;
pub mod segment;

pub use segment::{ClimbSolution, ClimbStepRequest, LevelSolution, LevelStepRequest, SegmentResult};
pub use vnav_core::{AccelFactorMode, PredictionError, Result};

/// The three collaborator models plus solver configuration. Immutable once
/// built; share it freely across threads.
#[derive(Clone, Debug)]
pub struct Predictor<A = StandardAtmosphere, E = TableEngine, F = A320FlightModel> {
    pub atmosphere: A,
    pub engine: E,
    pub flight: F,
    pub config: PredictionConfig,
}

impl Default for Predictor {
    fn default() -> Self {
        Self {
            atmosphere: StandardAtmosphere,
            engine: TableEngine::default(),
            flight: A320FlightModel::default(),
            config: PredictionConfig::default(),
        }
    }
}

impl<A, E, F> Predictor<A, E, F>
where
    A: AtmosphereModel,
    E: EngineModel,
    F: FlightModel,
{
    /// # Errors
    /// `Config` when `config` fails validation.
    pub fn new(atmosphere: A, engine: E, flight: F, config: PredictionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { atmosphere, engine, flight, config })
    }
}

static DEFAULT_PREDICTOR: Lazy<Predictor> = Lazy::new(Predictor::default);

/// Process-wide predictor with the standard atmosphere, CFM56-5B tables,
/// A320 aerodynamics and default configuration.
pub fn default_predictor() -> &'static Predictor {
    &DEFAULT_PREDICTOR
}

/// Solve a climb step with the default predictor.
///
/// # Errors
/// See [`Predictor::climb_step`].
pub fn solve_climb_step(req: &ClimbStepRequest) -> Result<SegmentResult> {
    default_predictor().solve_climb_step(req)
}

/// Solve a level step with the default predictor.
///
/// # Errors
/// See [`Predictor::level_step`].
pub fn solve_level_step(req: &LevelStepRequest) -> Result<SegmentResult> {
    default_predictor().solve_level_step(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let config = PredictionConfig { weight_tolerance: 0.0, ..PredictionConfig::default() };
        let err = Predictor::new(StandardAtmosphere, TableEngine::default(), A320FlightModel::default(), config)
            .unwrap_err();
        assert!(matches!(err, PredictionError::Config(_)));
    }

    #[test]
    fn default_predictor_is_shared() {
        assert!(std::ptr::eq(default_predictor(), default_predictor()));
        assert_eq!(default_predictor().config, PredictionConfig::default());
    }
}
