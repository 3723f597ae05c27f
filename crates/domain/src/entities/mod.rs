//! Domain entities - weather observations and derived daily state

mod archive_record;
mod temperature_extremes;

pub use archive_record::{ArchiveRecord, fields};
pub use temperature_extremes::{DailyTemperatureTracker, TemperatureExtremes};
