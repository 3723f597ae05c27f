//! Value Objects - Immutable, identity-less domain primitives

mod unit_system;

pub use unit_system::{Measurement, UnitSystem};
