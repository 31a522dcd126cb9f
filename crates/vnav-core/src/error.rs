use thiserror::Error;

/// Failure modes shared by the atmosphere, engine and flight models and the
/// segment solvers. A solve either returns a complete result or one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Non-physical request (zero step, non-positive weight, NaN input...).
    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    /// The climb fixed-point iteration ran out of budget while the mid-step
    /// weight was still moving by more than the tolerance.
    #[error("climb iteration did not converge after {iterations} iterations (last weight change {last_delta:.1})")]
    NonConvergence { iterations: u32, last_delta: f64 },

    /// Thrust is insufficient to climb at the requested weight and speed.
    #[error("degenerate climb: vertical speed {vertical_speed:.1} ft/min")]
    DegenerateClimb { vertical_speed: f64 },

    #[error("{table} lookup out of range: {input} = {value} not in [{min}, {max}]")]
    TableLookupOutOfRange {
        table: &'static str,
        input: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl PredictionError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        PredictionError::InvalidParameters { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, PredictionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = PredictionError::TableLookupOutOfRange {
            table: "thrust",
            input: "mach",
            value: 0.95,
            min: 0.0,
            max: 0.9,
        };
        assert_eq!(e.to_string(), "thrust lookup out of range: mach = 0.95 not in [0, 0.9]");

        let e = PredictionError::invalid("step size must be positive");
        assert_eq!(e.to_string(), "invalid parameters: step size must be positive");
    }
}
