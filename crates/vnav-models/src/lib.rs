//! vnav-models
//!
//! Aircraft-specific performance models consumed by the segment solvers:
//!
//! - `EngineModel`: corrected thrust and fuel flow from corrected N1 and Mach,
//!   with forward and inverse table lookups (`TableEngine` ships CFM56-5B
//!   class tables).
//! - `FlightModel`: lift/drag coefficients, drag force and the constant-thrust
//!   path angle (`A320FlightModel`).
//!
//! Both are traits so callers can plug in other airframes or test doubles.

pub mod engine;
pub mod flight;
pub mod table;

pub use engine::{EngineModel, TableEngine};
pub use flight::{A320FlightModel, DragConfig, FlapConf, FlightModel};
pub use table::Table2D;
