//! Solver configuration.
//!
//! Loaded once (JSON) and shared read-only by every solve. Missing keys fall
//! back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Iteration cap for the climb fixed-point loop.
    pub max_iterations: u32,
    /// Mid-step weight change [lb] below which the climb loop has converged.
    pub weight_tolerance: f64,
    /// Engines contributing thrust and fuel flow.
    pub engine_count: u32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self { max_iterations: 5, weight_tolerance: 100.0, engine_count: 2 }
    }
}

impl PredictionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| PredictionError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PredictionError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(PredictionError::Config("max_iterations must be at least 1".into()));
        }
        if !(self.weight_tolerance.is_finite() && self.weight_tolerance > 0.0) {
            return Err(PredictionError::Config("weight_tolerance must be positive".into()));
        }
        if self.engine_count == 0 {
            return Err(PredictionError::Config("engine_count must be at least 1".into()));
        }
        Ok(())
    }

    pub fn engines(&self) -> f64 { f64::from(self.engine_count) }
}
