//! Archive record to RainMachine payload mapping
//!
//! Only the fields listed in the mapping table are forwarded; every other
//! reading in the record is ignored. Values are converted from the record's
//! unit system into the metric units the weather parser expects.

use chrono::{DateTime, Utc};
use tracing::trace;
use domain::{
    ArchiveRecord, DailyTemperatureTracker, Measurement, TemperatureExtremes, UnitSystem, fields,
};

use crate::error::RainMachineError;
use crate::models::{WeatherEntry, WeatherPayload};

/// One row of the mapping table
struct FieldMapping {
    source: &'static str,
    measurement: Measurement,
    assign: fn(&mut WeatherEntry, f64),
}

const FIELD_MAP: &[FieldMapping] = &[
    FieldMapping {
        source: fields::OUT_TEMP,
        measurement: Measurement::Temperature,
        assign: |e, v| e.temperature = Some(v),
    },
    FieldMapping {
        source: fields::OUT_TEMP_MIN,
        measurement: Measurement::Temperature,
        assign: |e, v| e.mintemp = Some(v),
    },
    FieldMapping {
        source: fields::OUT_TEMP_MAX,
        measurement: Measurement::Temperature,
        assign: |e, v| e.maxtemp = Some(v),
    },
    FieldMapping {
        source: fields::OUT_HUMIDITY,
        measurement: Measurement::Humidity,
        assign: |e, v| e.maxrh = Some(v),
    },
    FieldMapping {
        source: fields::DEWPOINT,
        measurement: Measurement::Temperature,
        assign: |e, v| e.dewpoint = Some(v),
    },
    FieldMapping {
        source: fields::WIND_SPEED,
        measurement: Measurement::Speed,
        assign: |e, v| e.wind = Some(v),
    },
    FieldMapping {
        source: fields::BAROMETER,
        measurement: Measurement::Pressure,
        assign: |e, v| e.pressure = Some(v),
    },
    FieldMapping {
        source: fields::DAY_RAIN,
        measurement: Measurement::Precipitation,
        assign: |e, v| e.rain = Some(v),
    },
    FieldMapping {
        source: fields::ET,
        measurement: Measurement::Precipitation,
        assign: |e, v| e.et = Some(v),
    },
];

/// Names of the record fields that are forwarded
pub fn mapped_fields() -> impl Iterator<Item = &'static str> {
    std::iter::once(fields::DATE_TIME).chain(FIELD_MAP.iter().map(|m| m.source))
}

/// Translate a record into a weather entry
///
/// Daily extremes reported by the record itself take precedence over
/// `extremes`.
#[must_use]
pub fn map_record(
    record: &ArchiveRecord,
    units: UnitSystem,
    extremes: Option<TemperatureExtremes>,
) -> WeatherEntry {
    let mut entry = WeatherEntry {
        timestamp: record.timestamp(),
        ..Default::default()
    };

    for mapping in FIELD_MAP {
        if let Some(value) = record.get(mapping.source) {
            let converted = units.to_metric(mapping.measurement, value);
            trace!(
                field = mapping.source,
                value,
                converted,
                unit = mapping.measurement.metric_unit(),
                "Mapped reading"
            );
            if converted.is_finite() {
                (mapping.assign)(&mut entry, converted);
            }
        }
    }

    if let Some(e) = extremes {
        entry.mintemp.get_or_insert(e.min);
        entry.maxtemp.get_or_insert(e.max);
    }

    entry
}

/// Stateful mapper that derives daily temperature extremes across records
#[derive(Debug, Default)]
pub struct WeatherMapper {
    temperatures: DailyTemperatureTracker,
}

impl WeatherMapper {
    /// Create a mapper with no temperature history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the payload for `record`
    ///
    /// `now` stands in for the observation time of records without `dateTime`.
    ///
    /// # Errors
    ///
    /// Returns `RainMachineError::InvalidRecord` if the record declares an
    /// unknown unit system or an unrepresentable timestamp.
    pub fn map(
        &mut self,
        record: &ArchiveRecord,
        now: DateTime<Utc>,
    ) -> Result<WeatherPayload, RainMachineError> {
        let units = record.unit_system()?;
        let at = record.date_time()?.unwrap_or(now);
        let celsius = record
            .get(fields::OUT_TEMP)
            .map(|t| units.to_metric(Measurement::Temperature, t));
        let extremes = self.temperatures.observe(at, celsius);

        Ok(WeatherPayload::single(map_record(record, units, extremes)))
    }

    /// Temperature extremes of the day tracked so far
    #[must_use]
    pub const fn extremes(&self) -> Option<TemperatureExtremes> {
        self.temperatures.current()
    }
}
