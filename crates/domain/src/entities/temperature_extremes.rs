//! Running daily temperature extremes
//!
//! RainMachine's weather parser accepts the day's minimum and maximum
//! temperature. Stations rarely report those directly, so they are derived
//! from the stream of archive records for the current UTC day.

use chrono::{DateTime, NaiveDate, Utc};

/// Minimum and maximum temperature observed so far in a day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureExtremes {
    /// Lowest temperature, °C
    pub min: f64,
    /// Highest temperature, °C
    pub max: f64,
}

/// Tracks temperature extremes for the current UTC day
///
/// Readings belonging to an earlier day than the one being tracked are
/// ignored; a reading from a later day starts a new day.
#[derive(Debug, Clone, Default)]
pub struct DailyTemperatureTracker {
    day: Option<NaiveDate>,
    extremes: Option<TemperatureExtremes>,
}

impl DailyTemperatureTracker {
    /// Create an empty tracker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading taken at `at` and return the extremes of its day
    ///
    /// `celsius` may be `None` when the record carries no temperature; the
    /// extremes collected so far for that day are returned unchanged.
    pub fn observe(&mut self, at: DateTime<Utc>, celsius: Option<f64>) -> Option<TemperatureExtremes> {
        let day = at.date_naive();
        match self.day {
            Some(current) if day < current => return None,
            Some(current) if day == current => {},
            _ => {
                self.day = Some(day);
                self.extremes = None;
            },
        }

        if let Some(t) = celsius.filter(|t| t.is_finite()) {
            self.extremes = Some(match self.extremes {
                Some(e) => TemperatureExtremes {
                    min: e.min.min(t),
                    max: e.max.max(t),
                },
                None => TemperatureExtremes { min: t, max: t },
            });
        }

        self.extremes
    }

    /// Extremes for the day currently tracked
    #[must_use]
    pub const fn current(&self) -> Option<TemperatureExtremes> {
        self.extremes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn tracks_min_and_max() {
        let mut tracker = DailyTemperatureTracker::new();
        tracker.observe(at(1, 6), Some(12.0));
        tracker.observe(at(1, 14), Some(28.5));
        let e = tracker.observe(at(1, 20), Some(19.0)).unwrap();
        assert!((e.min - 12.0).abs() < f64::EPSILON);
        assert!((e.max - 28.5).abs() < f64::EPSILON);
    }

    #[test]
    fn resets_on_new_day() {
        let mut tracker = DailyTemperatureTracker::new();
        tracker.observe(at(1, 12), Some(30.0));
        let e = tracker.observe(at(2, 0), Some(15.0)).unwrap();
        assert!((e.min - 15.0).abs() < f64::EPSILON);
        assert!((e.max - 15.0).abs() < f64::EPSILON);
        assert!((tracker.current().unwrap().max - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ignores_readings_from_earlier_days() {
        let mut tracker = DailyTemperatureTracker::new();
        tracker.observe(at(2, 8), Some(10.0));
        assert!(tracker.observe(at(1, 23), Some(-5.0)).is_none());
        let e = tracker.current().unwrap();
        assert!((e.min - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_temperature_keeps_extremes() {
        let mut tracker = DailyTemperatureTracker::new();
        assert!(tracker.observe(at(1, 1), None).is_none());
        tracker.observe(at(1, 2), Some(3.0));
        let e = tracker.observe(at(1, 3), None).unwrap();
        assert!((e.max - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_day_without_temperature_clears_extremes() {
        let mut tracker = DailyTemperatureTracker::new();
        tracker.observe(at(1, 1), Some(3.0));
        assert!(tracker.observe(at(2, 1), None).is_none());
    }
}
