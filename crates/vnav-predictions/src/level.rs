//! Level step: constant altitude, constant speed, thrust = drag. Closed form.

use tracing::debug;
use vnav_core::{fuel_burned, minutes_for_distance, AtmosphereModel, PredictionError, Result, SpeedSchedule};
use vnav_models::{DragConfig, EngineModel, FlightModel};

use crate::segment::{LevelSolution, LevelStepRequest, SegmentResult};
use crate::Predictor;

impl<A, E, F> Predictor<A, E, F>
where
    A: AtmosphereModel,
    E: EngineModel,
    F: FlightModel,
{
    /// Solve one level step, returning the result together with the speed
    /// mode and the engine operating point.
    ///
    /// # Errors
    /// `InvalidParameters` for non-physical requests (including a headwind
    /// that cancels the TAS), `TableLookupOutOfRange` when the required
    /// thrust or Mach falls outside the engine tables.
    pub fn level_step(&self, req: &LevelStepRequest) -> Result<LevelSolution> {
        req.validate()?;

        let atm = &self.atmosphere;
        let theta = atm.temperature_ratio(req.altitude_ft, req.isa_dev_c);
        let delta = atm.pressure_ratio(theta);
        let speed = SpeedSchedule::select(atm, req.target_cas_kt, req.target_mach, theta, delta);

        let ground_speed = speed.tas - req.headwind_kt;
        if ground_speed <= 0.0 {
            return Err(PredictionError::invalid(format!(
                "headwind {} kt leaves no ground speed at TAS {:.1} kt",
                req.headwind_kt, speed.tas
            )));
        }

        let weight = req.zero_fuel_weight_lb + req.initial_fuel_weight_lb;
        let thrust = self.flight.drag(weight, speed.mach, delta, DragConfig::CLEAN);

        // Inverse engine lookup: per-engine corrected thrust -> corrected N1
        let engines = self.config.engines();
        let theta2 = atm.inlet_temperature_correction(theta, speed.mach);
        let delta2 = atm.inlet_pressure_correction(delta, speed.mach);
        let corrected_thrust = thrust / delta2 / engines;
        let corrected_n1 = self
            .engine
            .reverse_n1(speed.mach, corrected_thrust / self.engine.max_thrust_per_engine())?;
        let corrected_fuel_flow =
            self.engine.corrected_fuel_flow(corrected_n1, speed.mach, req.altitude_ft)? * engines;
        let fuel_flow = self.engine.uncorrect_fuel_flow(corrected_fuel_flow, delta2, theta2);
        let n1_pct = corrected_n1 * theta2.sqrt();

        let step_time = minutes_for_distance(req.step_size_nm, ground_speed);
        let burned = fuel_burned(fuel_flow, step_time);
        debug!(mode = ?speed.mode, mach = speed.mach, thrust, n1_pct, fuel_flow, step_time, "level step");

        Ok(LevelSolution {
            segment: SegmentResult {
                path_angle: 0.0,
                vertical_speed: 0.0,
                distance_traveled: req.step_size_nm,
                fuel_burned: burned,
                time_elapsed: step_time,
            },
            speed_mode: speed.mode,
            n1_pct,
            fuel_flow_lb_per_hr: fuel_flow,
        })
    }

    /// [`Predictor::level_step`] without the engine operating point.
    ///
    /// # Errors
    /// See [`Predictor::level_step`].
    pub fn solve_level_step(&self, req: &LevelStepRequest) -> Result<SegmentResult> {
        self.level_step(req).map(|s| s.segment)
    }
}
