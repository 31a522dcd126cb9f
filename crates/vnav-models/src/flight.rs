//! Aerodynamic model: lift and drag coefficients, drag force, and the
//! constant-thrust flight path angle.
//!
//! Forces in lbf, speeds in knots. Dynamic pressure is written in terms of
//! Mach and δ (q = 0.7·p0·δ·M², 0.7·p0 = 1481.4 lbf/ft²) or in terms of EAS
//! (q = ½ρ0·EAS², 1/(½ρ0) = 295.37 with EAS in knots).

/// Flap/slat configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlapConf {
    #[default]
    Clean,
    Conf1,
    Conf2,
    Conf3,
    ConfFull,
}

/// Drag-relevant aircraft configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragConfig {
    pub flaps: FlapConf,
    pub gear_down: bool,
    pub speedbrakes_out: bool,
}

impl DragConfig {
    pub const CLEAN: DragConfig =
        DragConfig { flaps: FlapConf::Clean, gear_down: false, speedbrakes_out: false };
}

/// Aerodynamic coefficient provider.
pub trait FlightModel {
    /// C_L needed to produce `lift` [lbf] at `eas` [kt].
    fn lift_coefficient_from_eas(&self, lift: f64, eas: f64) -> f64;
    /// C_L for 1 g flight at `weight` [lb], `mach` and δ.
    fn lift_coefficient(&self, weight: f64, mach: f64, delta: f64) -> f64;
    /// Low-speed (profile + induced) drag coefficient.
    fn drag_coefficient(&self, lift_coefficient: f64, config: DragConfig) -> f64;
    /// Compressibility drag increment.
    fn wave_drag(&self, mach: f64, lift_coefficient: f64, flaps: FlapConf) -> f64;
    /// Total drag [lbf] in 1 g flight.
    fn drag(&self, weight: f64, mach: f64, delta: f64, config: DragConfig) -> f64;
    /// Flight path angle [rad] sustained by `thrust` [lbf] at `weight` [lb].
    /// NaN when the thrust surplus exceeds what any path angle can absorb.
    fn path_angle(
        &self,
        thrust: f64,
        weight: f64,
        lift_coefficient: f64,
        drag_coefficient: f64,
        accel_factor: f64,
    ) -> f64;
}

/// 0.7 · sea-level static pressure [lbf/ft²]
const Q_PER_DELTA_MACH2: f64 = 1481.4;
/// 1 / (½ · ρ0) with ρ0 in slug/ft³ and speed in knots
const INV_HALF_RHO0_KT: f64 = 295.37;

/// Drag polar coefficients c0..c5 (C_D = Σ cᵢ·C_Lⁱ) per flap configuration.
fn polar(flaps: FlapConf) -> [f64; 6] {
    match flaps {
        FlapConf::Clean => [0.0233, -0.0379, 0.1537, -0.2319, 0.2635, -0.1043],
        FlapConf::Conf1 => [0.0300, 0.0, 0.0450, 0.0, 0.0, 0.0],
        FlapConf::Conf2 => [0.0450, 0.0, 0.0440, 0.0, 0.0, 0.0],
        FlapConf::Conf3 => [0.0550, 0.0, 0.0430, 0.0, 0.0, 0.0],
        FlapConf::ConfFull => [0.0800, 0.0, 0.0420, 0.0, 0.0, 0.0],
    }
}

/// A320-family clean-wing model.
#[derive(Clone, Copy, Debug)]
pub struct A320FlightModel {
    pub wing_area_ft2: f64,
    pub gear_drag: f64,
    pub speedbrake_drag: f64,
    /// Quarter-chord sweep [deg]
    pub sweep_deg: f64,
    /// Mean thickness-to-chord ratio
    pub thickness_ratio: f64,
    /// Korn technology factor (≈0.95 for supercritical sections)
    pub korn_factor: f64,
}

impl Default for A320FlightModel {
    fn default() -> Self {
        Self {
            wing_area_ft2: 1317.5,
            gear_drag: 0.0115,
            speedbrake_drag: 0.006_11,
            sweep_deg: 25.0,
            thickness_ratio: 0.11,
            korn_factor: 0.95,
        }
    }
}

impl A320FlightModel {
    /// Critical Mach from the Korn equation, M_crit = M_dd − (0.1/80)^(1/3).
    pub fn critical_mach(&self, lift_coefficient: f64) -> f64 {
        let cos_sweep = self.sweep_deg.to_radians().cos();
        let m_dd = self.korn_factor / cos_sweep
            - self.thickness_ratio / cos_sweep.powi(2)
            - lift_coefficient / (10.0 * cos_sweep.powi(3));
        m_dd - (0.1_f64 / 80.0).cbrt()
    }
}

impl FlightModel for A320FlightModel {
    fn lift_coefficient_from_eas(&self, lift: f64, eas: f64) -> f64 {
        (INV_HALF_RHO0_KT * lift) / (eas * eas * self.wing_area_ft2)
    }

    fn lift_coefficient(&self, weight: f64, mach: f64, delta: f64) -> f64 {
        weight / (Q_PER_DELTA_MACH2 * mach * mach * delta * self.wing_area_ft2)
    }

    fn drag_coefficient(&self, lift_coefficient: f64, config: DragConfig) -> f64 {
        let c = polar(config.flaps);
        let cl = lift_coefficient;
        // Horner
        let base = c.iter().rev().fold(0.0, |acc, &ci| acc * cl + ci);
        let gear = if config.gear_down { self.gear_drag } else { 0.0 };
        let speedbrakes = if config.speedbrakes_out { self.speedbrake_drag } else { 0.0 };
        base + gear + speedbrakes
    }

    fn wave_drag(&self, mach: f64, lift_coefficient: f64, flaps: FlapConf) -> f64 {
        if flaps != FlapConf::Clean {
            return 0.0;
        }
        let excess = mach - self.critical_mach(lift_coefficient);
        // Lock's fourth-power law
        if excess > 0.0 { 20.0 * excess.powi(4) } else { 0.0 }
    }

    fn drag(&self, weight: f64, mach: f64, delta: f64, config: DragConfig) -> f64 {
        let cl = self.lift_coefficient(weight, mach, delta);
        let cd = self.drag_coefficient(cl, config) + self.wave_drag(mach, cl, config.flaps);
        Q_PER_DELTA_MACH2 * mach * mach * delta * self.wing_area_ft2 * cd
    }

    fn path_angle(
        &self,
        thrust: f64,
        weight: f64,
        lift_coefficient: f64,
        drag_coefficient: f64,
        accel_factor: f64,
    ) -> f64 {
        ((thrust / weight - drag_coefficient / lift_coefficient) / accel_factor).asin()
    }
}
