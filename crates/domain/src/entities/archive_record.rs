//! Weather archive record
//!
//! A flat snapshot of sensor readings emitted by the weather station host on
//! every archive interval. Field names follow weewx conventions (`outTemp`,
//! `windSpeed`, ...). Missing and `null` readings are simply absent.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::DomainError;
use crate::value_objects::UnitSystem;

/// Well-known weewx field names
pub mod fields {
    /// Record timestamp, epoch seconds
    pub const DATE_TIME: &str = "dateTime";
    /// Unit system code of the record
    pub const US_UNITS: &str = "usUnits";
    /// Outside temperature
    pub const OUT_TEMP: &str = "outTemp";
    /// Lowest outside temperature of the day
    pub const OUT_TEMP_MIN: &str = "outTempMin";
    /// Highest outside temperature of the day
    pub const OUT_TEMP_MAX: &str = "outTempMax";
    /// Outside relative humidity
    pub const OUT_HUMIDITY: &str = "outHumidity";
    /// Dew point
    pub const DEWPOINT: &str = "dewpoint";
    /// Wind speed
    pub const WIND_SPEED: &str = "windSpeed";
    /// Sea-level barometric pressure
    pub const BAROMETER: &str = "barometer";
    /// Rain accumulated since midnight
    pub const DAY_RAIN: &str = "dayRain";
    /// Evapotranspiration
    pub const ET: &str = "ET";
}

/// A single archive record: weewx field name to numeric reading
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<f64>>")]
pub struct ArchiveRecord {
    values: BTreeMap<String, f64>,
}

impl ArchiveRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a record from a JSON object
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecord` if the input is not a JSON object
    /// of numeric (or `null`) values.
    pub fn from_json(input: &str) -> Result<Self, DomainError> {
        serde_json::from_str(input).map_err(|e| DomainError::InvalidRecord(e.to_string()))
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a reading; non-finite values are discarded
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if value.is_finite() {
            self.values.insert(name, value);
        } else {
            self.values.remove(&name);
        }
    }

    /// Reading for `name`, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Whether a reading for `name` is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of readings in the record
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record carries no readings at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate readings in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Record timestamp in epoch seconds
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        self.get(fields::DATE_TIME).map(|ts| ts.trunc() as i64)
    }

    /// Record timestamp as a UTC datetime
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the timestamp cannot be
    /// represented.
    pub fn date_time(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        self.timestamp()
            .map(|ts| {
                DateTime::from_timestamp(ts, 0)
                    .ok_or_else(|| DomainError::InvalidDateTime(format!("timestamp {ts}")))
            })
            .transpose()
    }

    /// Unit system declared by `usUnits`, metric when absent
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownUnitSystem` for an unrecognised code.
    pub fn unit_system(&self) -> Result<UnitSystem, DomainError> {
        self.get(fields::US_UNITS)
            .map_or(Ok(UnitSystem::default()), |code| {
                UnitSystem::from_code(code.trunc() as i64)
            })
    }
}

impl From<BTreeMap<String, Option<f64>>> for ArchiveRecord {
    fn from(raw: BTreeMap<String, Option<f64>>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(k, v)| v.filter(|v| v.is_finite()).map(|v| (k, v)))
            .collect();
        Self { values }
    }
}

impl FromIterator<(String, f64)> for ArchiveRecord {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_skips_nulls() {
        let record =
            ArchiveRecord::from_json(r#"{"dateTime": 1563362400, "outTemp": 21.5, "rain": null}"#)
                .unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get(fields::OUT_TEMP), Some(21.5));
        assert!(!record.contains("rain"));
    }

    #[test]
    fn from_json_rejects_non_numeric_values() {
        let err = ArchiveRecord::from_json(r#"{"outTemp": "warm"}"#).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecord(_)));
    }

    #[test]
    fn from_json_rejects_arrays() {
        assert!(ArchiveRecord::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn insert_discards_non_finite() {
        let record = ArchiveRecord::new()
            .with(fields::OUT_TEMP, 10.0)
            .with(fields::OUT_TEMP, f64::NAN)
            .with(fields::WIND_SPEED, f64::INFINITY);
        assert!(record.is_empty());
    }

    #[test]
    fn timestamp_and_date_time() {
        let record = ArchiveRecord::new().with(fields::DATE_TIME, 1_563_362_587.0);
        assert_eq!(record.timestamp(), Some(1_563_362_587));
        let dt = record.date_time().unwrap().unwrap();
        assert_eq!(dt.timestamp(), 1_563_362_587);
    }

    #[test]
    fn missing_timestamp() {
        let record = ArchiveRecord::new().with(fields::OUT_TEMP, 1.0);
        assert_eq!(record.timestamp(), None);
        assert!(record.date_time().unwrap().is_none());
    }

    #[test]
    fn unit_system_defaults_to_metric() {
        let record = ArchiveRecord::new();
        assert_eq!(record.unit_system().unwrap(), UnitSystem::Metric);
    }

    #[test]
    fn unit_system_from_record() {
        let record = ArchiveRecord::new().with(fields::US_UNITS, 1.0);
        assert_eq!(record.unit_system().unwrap(), UnitSystem::Us);

        let record = ArchiveRecord::new().with(fields::US_UNITS, 3.0);
        assert!(record.unit_system().is_err());
    }

    #[test]
    fn collect_from_pairs() {
        let record: ArchiveRecord = vec![
            ("outTemp".to_string(), 5.0),
            ("windSpeed".to_string(), 2.0),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["outTemp", "windSpeed"]);
    }
}
