// crates/vnav-ffi-wasm/src/lib.rs
//
// WASM bindings: climb-step + level-step exports.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;

// --- our crates ---
use vnav_core::AccelFactorMode;
use vnav_predictions::{default_predictor, ClimbStepRequest, LevelStepRequest, SegmentResult};

// Better panic messages in browser console
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/* --------------------------- Shared DTOs (JS) --------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSegmentResult {
    pub path_angle_rad: f64,
    pub vertical_speed_fpm: f64,
    pub distance_nm: f64,
    pub fuel_burned_lb: f64,
    pub time_min: f64,
    /// "CAS" | "MACH"
    pub speed_mode: String,
}

fn mode_name(mode: AccelFactorMode) -> String {
    match mode {
        AccelFactorMode::ConstantCas => "CAS".to_string(),
        AccelFactorMode::ConstantMach => "MACH".to_string(),
    }
}

impl JsSegmentResult {
    fn new(seg: SegmentResult, mode: AccelFactorMode) -> Self {
        Self {
            path_angle_rad: seg.path_angle,
            vertical_speed_fpm: seg.vertical_speed,
            distance_nm: seg.distance_traveled,
            fuel_burned_lb: seg.fuel_burned,
            time_min: seg.time_elapsed,
            speed_mode: mode_name(mode),
        }
    }
}

/* ------------------------------ Climb step ------------------------------ */

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsClimbStepInput {
    pub initial_altitude_ft: f64,
    pub step_size_ft: f64,
    pub econ_cas_kt: f64,
    pub econ_mach: f64,
    pub climb_n1_pct: f64,
    pub zero_fuel_weight_lb: f64,
    pub fuel_weight_lb: f64,
    /// tailwind is negative
    #[serde(default)]
    pub headwind_kt: f64,
    #[serde(default)]
    pub isa_dev_c: f64,
    /// defaults to the ISA tropopause
    #[serde(default = "default_tropopause_ft")]
    pub tropopause_ft: f64,
}

fn default_tropopause_ft() -> f64 { 36_089.0 }

impl From<JsClimbStepInput> for ClimbStepRequest {
    fn from(i: JsClimbStepInput) -> Self {
        ClimbStepRequest {
            initial_altitude_ft: i.initial_altitude_ft,
            step_size_ft: i.step_size_ft,
            target_cas_kt: i.econ_cas_kt,
            target_mach: i.econ_mach,
            climb_n1_pct: i.climb_n1_pct,
            zero_fuel_weight_lb: i.zero_fuel_weight_lb,
            initial_fuel_weight_lb: i.fuel_weight_lb,
            headwind_kt: i.headwind_kt,
            isa_dev_c: i.isa_dev_c,
            tropopause_altitude_ft: i.tropopause_ft,
        }
    }
}

/// Solve a climb step; errors come back as their display string.
pub fn run_climb_step(input: JsClimbStepInput) -> Result<JsSegmentResult, String> {
    let sol = default_predictor()
        .climb_step(&input.into())
        .map_err(|e| e.to_string())?;
    Ok(JsSegmentResult::new(sol.segment, sol.speed_mode))
}

#[wasm_bindgen]
pub fn solve_climb_step_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsClimbStepInput = swb::from_value(input)?;
    let out = run_climb_step(inp).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&out).map_err(|e| e.into())
}

/* ------------------------------ Level step ------------------------------ */

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsLevelStepInput {
    pub altitude_ft: f64,
    pub step_size_nm: f64,
    pub econ_cas_kt: f64,
    pub econ_mach: f64,
    pub zero_fuel_weight_lb: f64,
    pub fuel_weight_lb: f64,
    #[serde(default)]
    pub headwind_kt: f64,
    #[serde(default)]
    pub isa_dev_c: f64,
}

impl From<JsLevelStepInput> for LevelStepRequest {
    fn from(i: JsLevelStepInput) -> Self {
        LevelStepRequest {
            altitude_ft: i.altitude_ft,
            step_size_nm: i.step_size_nm,
            target_cas_kt: i.econ_cas_kt,
            target_mach: i.econ_mach,
            zero_fuel_weight_lb: i.zero_fuel_weight_lb,
            initial_fuel_weight_lb: i.fuel_weight_lb,
            headwind_kt: i.headwind_kt,
            isa_dev_c: i.isa_dev_c,
        }
    }
}

pub fn run_level_step(input: JsLevelStepInput) -> Result<JsSegmentResult, String> {
    let sol = default_predictor()
        .level_step(&input.into())
        .map_err(|e| e.to_string())?;
    Ok(JsSegmentResult::new(sol.segment, sol.speed_mode))
}

#[wasm_bindgen]
pub fn solve_level_step_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsLevelStepInput = swb::from_value(input)?;
    let out = run_level_step(inp).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&out).map_err(|e| e.into())
}

/// Level step with the engine operating point (N1, fuel flow) attached.
#[wasm_bindgen]
pub fn level_step_detail_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsLevelStepInput = swb::from_value(input)?;
    let sol = default_predictor()
        .level_step(&inp.into())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    swb::to_value(&sol).map_err(|e| e.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climb_input_defaults_optional_fields() {
        let inp: JsClimbStepInput = serde_json::from_str(
            r#"{
                "initial_altitude_ft": 10000, "step_size_ft": 2000,
                "econ_cas_kt": 250, "econ_mach": 0.78, "climb_n1_pct": 90,
                "zero_fuel_weight_lb": 120000, "fuel_weight_lb": 30000
            }"#,
        )
        .unwrap();
        assert_eq!(inp.headwind_kt, 0.0);
        assert_eq!(inp.tropopause_ft, 36_089.0);

        let out = run_climb_step(inp).unwrap();
        assert_eq!(out.speed_mode, "CAS");
        assert!(out.vertical_speed_fpm > 0.0);
    }

    #[test]
    fn level_step_reports_mach_mode() {
        let inp: JsLevelStepInput = serde_json::from_str(
            r#"{
                "altitude_ft": 35000, "step_size_nm": 100,
                "econ_cas_kt": 280, "econ_mach": 0.80,
                "zero_fuel_weight_lb": 120000, "fuel_weight_lb": 20000
            }"#,
        )
        .unwrap();
        let out = run_level_step(inp).unwrap();
        assert_eq!(out.speed_mode, "MACH");
        assert_eq!(out.distance_nm, 100.0);
    }

    #[test]
    fn level_solution_serializes_operating_point() {
        let inp = JsLevelStepInput {
            altitude_ft: 35_000.0,
            step_size_nm: 100.0,
            econ_cas_kt: 280.0,
            econ_mach: 0.80,
            zero_fuel_weight_lb: 120_000.0,
            fuel_weight_lb: 20_000.0,
            headwind_kt: 0.0,
            isa_dev_c: 0.0,
        };
        let sol = default_predictor().level_step(&inp.into()).unwrap();
        let json = serde_json::to_value(sol).unwrap();
        assert!(json["n1_pct"].as_f64().unwrap() > 0.0);
        assert_eq!(json["speed_mode"], "ConstantMach");
        assert_eq!(json["segment"]["distance_traveled"], 100.0);
    }

    #[test]
    fn solver_errors_become_strings() {
        let inp = JsLevelStepInput {
            altitude_ft: 35_000.0,
            step_size_nm: 0.0,
            econ_cas_kt: 280.0,
            econ_mach: 0.80,
            zero_fuel_weight_lb: 120_000.0,
            fuel_weight_lb: 20_000.0,
            headwind_kt: 0.0,
            isa_dev_c: 0.0,
        };
        let err = run_level_step(inp).unwrap_err();
        assert!(err.starts_with("invalid parameters"), "{err}");
    }
}
