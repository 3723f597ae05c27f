//! weewx unit systems
//!
//! weewx tags every archive record with a `usUnits` code describing the units
//! of all readings in that record. RainMachine only accepts metric values, so
//! each reading is normalised through [`UnitSystem::to_metric`].
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{Measurement, UnitSystem};
//!
//! let us = UnitSystem::from_code(1).expect("known code");
//! assert_eq!(us, UnitSystem::Us);
//! assert!((us.to_metric(Measurement::Temperature, 212.0) - 100.0).abs() < 1e-9);
//! ```

use std::fmt;

use crate::errors::DomainError;

/// Unit system of a weewx archive record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    /// US customary: °F, mph, inHg, inches
    Us,
    /// Metric: °C, km/h, mbar, centimeters
    #[default]
    Metric,
    /// Metric for weather: °C, m/s, mbar, millimeters
    MetricWx,
}

/// Kind of physical quantity carried by a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    /// Air or dew point temperature
    Temperature,
    /// Relative humidity in percent (identical in every unit system)
    Humidity,
    /// Wind speed
    Speed,
    /// Barometric pressure
    Pressure,
    /// Rain or evapotranspiration depth
    Precipitation,
}

impl Measurement {
    /// Unit RainMachine expects for this quantity
    #[must_use]
    pub const fn metric_unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Speed => "m/s",
            Self::Pressure => "kPa",
            Self::Precipitation => "mm",
        }
    }
}

impl UnitSystem {
    /// weewx code for the US customary system
    pub const US_CODE: i64 = 0x01;
    /// weewx code for the metric system
    pub const METRIC_CODE: i64 = 0x10;
    /// weewx code for the metric-for-weather system
    pub const METRICWX_CODE: i64 = 0x11;

    /// Resolve a `usUnits` code
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownUnitSystem` for codes weewx does not define.
    pub const fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            Self::US_CODE => Ok(Self::Us),
            Self::METRIC_CODE => Ok(Self::Metric),
            Self::METRICWX_CODE => Ok(Self::MetricWx),
            other => Err(DomainError::UnknownUnitSystem(other)),
        }
    }

    /// The `usUnits` code of this system
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Us => Self::US_CODE,
            Self::Metric => Self::METRIC_CODE,
            Self::MetricWx => Self::METRICWX_CODE,
        }
    }

    /// Convert a reading in this unit system to the unit given by
    /// [`Measurement::metric_unit`]
    #[must_use]
    pub fn to_metric(self, measurement: Measurement, value: f64) -> f64 {
        match (self, measurement) {
            (_, Measurement::Humidity) | (Self::MetricWx, Measurement::Speed | Measurement::Precipitation) => {
                value
            },
            (Self::Us, Measurement::Temperature) => (value - 32.0) * 5.0 / 9.0,
            (Self::Metric | Self::MetricWx, Measurement::Temperature) => value,
            (Self::Us, Measurement::Speed) => value * 0.447_04,
            (Self::Metric, Measurement::Speed) => value / 3.6,
            (Self::Us, Measurement::Pressure) => value * 3.386_389,
            (Self::Metric | Self::MetricWx, Measurement::Pressure) => value / 10.0,
            (Self::Us, Measurement::Precipitation) => value * 25.4,
            (Self::Metric, Measurement::Precipitation) => value * 10.0,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Us => write!(f, "US"),
            Self::Metric => write!(f, "METRIC"),
            Self::MetricWx => write!(f, "METRICWX"),
        }
    }
}
