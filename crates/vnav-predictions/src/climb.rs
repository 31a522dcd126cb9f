//! Climb step: fixed-point reconciliation of weight, lift, drag, thrust and
//! path angle over one altitude increment.
//!
//! Thrust and fuel flow are fixed by the N1 setting and the mid-step flight
//! condition. What moves between passes is the mid-step weight (start weight
//! minus half the fuel burned, i.e. the trapezoidal average over the step)
//! and the lift it implies (W·cos γ). The loop stops once the mid-step weight
//! changes by less than the configured tolerance.

use tracing::{debug, warn};
use vnav_core::{
    distance_nm, fuel_burned, knots_to_fpm, AtmosphereModel, PredictionError, Result,
    SpeedSchedule,
};
use vnav_models::{DragConfig, EngineModel, FlightModel};

use crate::segment::{ClimbSolution, ClimbStepRequest, SegmentResult};
use crate::Predictor;

impl<A, E, F> Predictor<A, E, F>
where
    A: AtmosphereModel,
    E: EngineModel,
    F: FlightModel,
{
    /// Solve one climb step, returning the result together with the speed
    /// mode and the number of passes the iteration took.
    ///
    /// # Errors
    /// `InvalidParameters` for non-physical requests (including a thrust
    /// surplus no path angle can absorb), `TableLookupOutOfRange`
    /// when the flight condition leaves the engine tables, `DegenerateClimb`
    /// when the thrust cannot sustain a climb, `NonConvergence` when the
    /// iteration budget runs out.
    pub fn climb_step(&self, req: &ClimbStepRequest) -> Result<ClimbSolution> {
        req.validate()?;

        let atm = &self.atmosphere;
        let mid_altitude = req.mid_step_altitude();
        let theta = atm.temperature_ratio(mid_altitude, req.isa_dev_c);
        let delta = atm.pressure_ratio(theta);
        let speed = SpeedSchedule::select(atm, req.target_cas_kt, req.target_mach, theta, delta);
        debug!(mode = ?speed.mode, mach = speed.mach, tas = speed.tas, mid_altitude, "climb speed");

        let ground_speed = speed.tas - req.headwind_kt;
        if ground_speed <= 0.0 {
            return Err(PredictionError::invalid(format!(
                "headwind {} kt leaves no ground speed at TAS {:.1} kt",
                req.headwind_kt, speed.tas
            )));
        }

        // Engine operating point, fixed for the whole step
        let engines = self.config.engines();
        let theta2 = atm.inlet_temperature_correction(theta, speed.mach);
        let delta2 = atm.inlet_pressure_correction(delta, speed.mach);
        let corrected_n1 = self.engine.corrected_n1(req.climb_n1_pct, theta2);
        let corrected_thrust = self.engine.thrust_fraction(corrected_n1, speed.mach)?
            * engines
            * self.engine.max_thrust_per_engine();
        let corrected_fuel_flow =
            self.engine.corrected_fuel_flow(corrected_n1, speed.mach, mid_altitude)? * engines;
        let thrust = self.engine.uncorrect_thrust(corrected_thrust, delta2);
        let fuel_flow = self.engine.uncorrect_fuel_flow(corrected_fuel_flow, delta2, theta2);

        let accel_factor = atm.acceleration_factor(
            speed.mach,
            mid_altitude,
            req.isa_dev_c,
            mid_altitude > req.tropopause_altitude_ft,
            speed.mode,
        );

        let start_weight = req.zero_fuel_weight_lb + req.initial_fuel_weight_lb;
        let mut mid_step_weight = start_weight;
        // small path angle: lift ≈ weight to start
        let mut lift = start_weight;
        let mut iterations = 0u32;

        let segment = loop {
            let cl = self.flight.lift_coefficient_from_eas(lift, speed.eas);
            let cd = self.flight.drag_coefficient(cl, DragConfig::CLEAN);
            let path_angle = self.flight.path_angle(thrust, mid_step_weight, cl, cd, accel_factor);

            // asin of a thrust surplus beyond 1 (or a NaN coefficient)
            if path_angle.is_nan() {
                warn!(thrust, mid_step_weight, cl, cd, accel_factor, "thrust surplus out of range");
                return Err(PredictionError::invalid(format!(
                    "thrust surplus out of range: {thrust:.0} lbf at weight {mid_step_weight:.0} lb has no climb path angle"
                )));
            }

            let vertical_speed = knots_to_fpm(speed.tas * path_angle.sin());
            if vertical_speed <= 0.0 {
                warn!(vertical_speed, thrust, mid_step_weight, "thrust cannot sustain climb");
                return Err(PredictionError::DegenerateClimb { vertical_speed });
            }

            let step_time = req.step_size_ft / vertical_speed;
            let distance = distance_nm(ground_speed, step_time);
            let burned = fuel_burned(fuel_flow, step_time);

            let previous = mid_step_weight;
            mid_step_weight = start_weight - burned / 2.0;
            lift = mid_step_weight * path_angle.cos();
            iterations += 1;

            let change = (previous - mid_step_weight).abs();
            debug!(iterations, path_angle, vertical_speed, mid_step_weight, change, "climb pass");

            if change < self.config.weight_tolerance {
                break SegmentResult {
                    path_angle,
                    vertical_speed,
                    distance_traveled: distance,
                    fuel_burned: burned,
                    time_elapsed: step_time,
                };
            }
            if iterations >= self.config.max_iterations {
                warn!(iterations, change, "climb step did not converge");
                return Err(PredictionError::NonConvergence { iterations, last_delta: change });
            }
        };

        Ok(ClimbSolution { segment, speed_mode: speed.mode, iterations })
    }

    /// [`Predictor::climb_step`] without the diagnostics.
    ///
    /// # Errors
    /// See [`Predictor::climb_step`].
    pub fn solve_climb_step(&self, req: &ClimbStepRequest) -> Result<SegmentResult> {
        self.climb_step(req).map(|s| s.segment)
    }
}
