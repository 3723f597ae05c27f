//! Domain layer for the RainMachine weather forwarder
//!
//! Contains the weather archive record model, weewx unit systems and the
//! conversions needed to express readings in the metric units RainMachine
//! expects. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
