//! Engine performance: corrected thrust and fuel flow from corrected N1 and
//! Mach, plus the inlet corrections that map them back to true values.
//!
//! Corrected quantities are normalized by inlet conditions (θ₂, δ₂) so that a
//! single table covers every altitude:
//!
//!   N1c = N1 / √θ₂,   Fc = F / δ₂,   WFc = WF / (δ₂·√θ₂)

use vnav_core::Result;

use crate::table::Table2D;

/// Engine thrust/fuel-flow provider. All thrust and fuel-flow values are per
/// engine; the solvers multiply by the engine count.
pub trait EngineModel {
    /// Corrected N1 [%] for a commanded N1 at inlet temperature ratio θ₂.
    fn corrected_n1(&self, n1: f64, theta2: f64) -> f64;
    /// Corrected thrust as a fraction of `max_thrust_per_engine`.
    fn thrust_fraction(&self, corrected_n1: f64, mach: f64) -> Result<f64>;
    /// Corrected N1 producing `thrust_fraction` at `mach`.
    fn reverse_n1(&self, mach: f64, thrust_fraction: f64) -> Result<f64>;
    /// Corrected fuel flow [lb/h].
    fn corrected_fuel_flow(&self, corrected_n1: f64, mach: f64, altitude_ft: f64) -> Result<f64>;
    fn uncorrect_thrust(&self, corrected_thrust: f64, delta2: f64) -> f64;
    fn uncorrect_fuel_flow(&self, corrected_fuel_flow: f64, delta2: f64, theta2: f64) -> f64;
    /// Rated maximum thrust [lbf].
    fn max_thrust_per_engine(&self) -> f64;
}

/* ------------------------- CFM56-5B class tables ------------------------- */

const CORRECTED_N1: &[f64] = &[20.0, 40.0, 60.0, 70.0, 80.0, 85.0, 90.0, 95.0, 100.0, 105.0, 110.0];
const MACH: &[f64] = &[0.0, 0.2, 0.4, 0.6, 0.8, 0.9];

/// Corrected thrust / max thrust. Ram drag erodes net thrust as Mach rises.
const THRUST_FRACTION: &[&[f64]] = &[
    //  M0.0   M0.2   M0.4   M0.6   M0.8   M0.9
    &[0.030, 0.020, 0.010, 0.005, 0.002, 0.001], // 20
    &[0.080, 0.060, 0.045, 0.030, 0.020, 0.015], // 40
    &[0.200, 0.170, 0.140, 0.115, 0.095, 0.085], // 60
    &[0.300, 0.260, 0.220, 0.190, 0.165, 0.150], // 70
    &[0.450, 0.390, 0.340, 0.300, 0.270, 0.250], // 80
    &[0.560, 0.490, 0.430, 0.380, 0.345, 0.325], // 85
    &[0.690, 0.610, 0.540, 0.480, 0.440, 0.415], // 90
    &[0.840, 0.750, 0.660, 0.590, 0.540, 0.510], // 95
    &[1.000, 0.890, 0.790, 0.710, 0.650, 0.615], // 100
    &[1.120, 1.000, 0.890, 0.800, 0.735, 0.700], // 105
    &[1.200, 1.080, 0.960, 0.870, 0.800, 0.765], // 110
];

/// Corrected fuel flow [lb/h] at sea level.
const FUEL_FLOW: &[&[f64]] = &[
    //  M0.0     M0.2     M0.4     M0.6     M0.8     M0.9
    &[  593.0,   526.0,   428.0,   372.0,   332.0,   317.0], // 20
    &[ 1081.0,   977.0,   876.0,   730.0,   617.0,   549.0], // 40
    &[ 2253.0,  2218.0,  2092.0,  1947.0,  1805.0,  1711.0], // 60
    &[ 3229.0,  3233.0,  3116.0,  3021.0,  2913.0,  2790.0], // 70
    &[ 4693.0,  4700.0,  4652.0,  4596.0,  4576.0,  4449.0], // 80
    &[ 5767.0,  5828.0,  5804.0,  5741.0,  5764.0,  5694.0], // 85
    &[ 7037.0,  7182.0,  7212.0,  7173.0,  7269.0,  7188.0], // 90
    &[ 8501.0,  8761.0,  8748.0,  8748.0,  8853.0,  8765.0], // 95
    &[10063.0, 10341.0, 10413.0, 10467.0, 10595.0, 10507.0], // 100
    &[11235.0, 11582.0, 11693.0, 11755.0, 11941.0, 11918.0], // 105
    &[12016.0, 12485.0, 12589.0, 12758.0, 12970.0, 12997.0], // 110
];

const CFM56_THRUST_TABLE: Table2D = Table2D {
    name: "corrected thrust",
    row_input: "corrected N1",
    col_input: "mach",
    rows: CORRECTED_N1,
    cols: MACH,
    values: THRUST_FRACTION,
};

const CFM56_FUEL_FLOW_TABLE: Table2D = Table2D {
    name: "corrected fuel flow",
    row_input: "corrected N1",
    col_input: "mach",
    rows: CORRECTED_N1,
    cols: MACH,
    values: FUEL_FLOW,
};

/// Table-driven engine model.
#[derive(Clone, Copy, Debug)]
pub struct TableEngine {
    pub thrust: Table2D,
    pub fuel_flow: Table2D,
    /// Rated max thrust per engine [lbf]
    pub max_thrust_lbf: f64,
    /// Fractional reduction of corrected fuel flow per foot of altitude
    pub fuel_flow_altitude_lapse: f64,
}

impl TableEngine {
    pub const fn cfm56_5b() -> Self {
        Self {
            thrust: CFM56_THRUST_TABLE,
            fuel_flow: CFM56_FUEL_FLOW_TABLE,
            max_thrust_lbf: 27_120.0,
            fuel_flow_altitude_lapse: 2.0e-6,
        }
    }
}

impl Default for TableEngine {
    fn default() -> Self { Self::cfm56_5b() }
}

impl EngineModel for TableEngine {
    fn corrected_n1(&self, n1: f64, theta2: f64) -> f64 {
        n1 / theta2.sqrt()
    }

    fn thrust_fraction(&self, corrected_n1: f64, mach: f64) -> Result<f64> {
        self.thrust.interpolate(corrected_n1, mach)
    }

    fn reverse_n1(&self, mach: f64, thrust_fraction: f64) -> Result<f64> {
        self.thrust.reverse_interpolate(mach, thrust_fraction)
    }

    fn corrected_fuel_flow(&self, corrected_n1: f64, mach: f64, altitude_ft: f64) -> Result<f64> {
        let sea_level = self.fuel_flow.interpolate(corrected_n1, mach)?;
        Ok(sea_level * (1.0 - self.fuel_flow_altitude_lapse * altitude_ft.max(0.0)))
    }

    fn uncorrect_thrust(&self, corrected_thrust: f64, delta2: f64) -> f64 {
        corrected_thrust * delta2
    }

    fn uncorrect_fuel_flow(&self, corrected_fuel_flow: f64, delta2: f64, theta2: f64) -> f64 {
        corrected_fuel_flow * delta2 * theta2.sqrt()
    }

    fn max_thrust_per_engine(&self) -> f64 { self.max_thrust_lbf }
}
