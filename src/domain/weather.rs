use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{PredictionError, Result};

/// Ambient temperature domain (°C)
pub const AMBIENT_TEMPERATURE_RANGE: RangeInclusive<f64> = 20.0..=45.0;
/// Module (panel) temperature domain (°C)
pub const MODULE_TEMPERATURE_RANGE: RangeInclusive<f64> = 20.0..=75.0;
/// Irradiation domain (sunlight intensity as fed to the model)
pub const IRRADIATION_RANGE: RangeInclusive<f64> = 0.0..=1.2;

/// Hour used when no time of day is supplied (solar noon)
pub const DEFAULT_HOUR: u32 = 12;
pub const DEFAULT_MINUTE: u32 = 0;

/// Weather and time inputs for one prediction request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Ambient temperature (°C)
    pub ambient_temperature: f64,
    /// Module temperature (°C)
    pub module_temperature: f64,
    /// Irradiation
    pub irradiation: f64,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Minute of hour (0-59)
    pub minute: u32,
}

impl WeatherSample {
    /// Build a sample from an optional time of day.
    ///
    /// Without a time the sample assumes peak sun at 12:00.
    pub fn new(
        ambient_temperature: f64,
        module_temperature: f64,
        irradiation: f64,
        time: Option<NaiveTime>,
    ) -> Self {
        let (hour, minute) = time
            .map(|t| (t.hour(), t.minute()))
            .unwrap_or((DEFAULT_HOUR, DEFAULT_MINUTE));

        Self {
            ambient_temperature,
            module_temperature,
            irradiation,
            hour,
            minute,
        }
    }

    pub fn at(mut self, hour: u32, minute: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self
    }

    /// Check every field against its documented domain
    pub fn validate(&self) -> Result<()> {
        check_range(
            "ambient_temperature",
            self.ambient_temperature,
            &AMBIENT_TEMPERATURE_RANGE,
        )?;
        check_range(
            "module_temperature",
            self.module_temperature,
            &MODULE_TEMPERATURE_RANGE,
        )?;
        check_range("irradiation", self.irradiation, &IRRADIATION_RANGE)?;

        if self.hour > 23 {
            return Err(PredictionError::validation(format!(
                "hour {} outside [0, 23]",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(PredictionError::validation(format!(
                "minute {} outside [0, 59]",
                self.minute
            )));
        }
        Ok(())
    }
}

fn check_range(field: &str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    // NaN fails `contains`, so it is rejected here too
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PredictionError::validation(format!(
            "{} {} outside [{}, {}]",
            field,
            value,
            range.start(),
            range.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_time_is_solar_noon() {
        let sample = WeatherSample::new(30.0, 45.0, 0.5, None);
        assert_eq!(sample.hour, 12);
        assert_eq!(sample.minute, 0);
    }

    #[test]
    fn test_explicit_time() {
        let time = NaiveTime::from_hms_opt(7, 45, 30).unwrap();
        let sample = WeatherSample::new(30.0, 45.0, 0.5, Some(time));
        assert_eq!((sample.hour, sample.minute), (7, 45));
    }

    #[test]
    fn test_validate_bounds_are_inclusive() {
        assert!(WeatherSample::new(20.0, 20.0, 0.0, None).validate().is_ok());
        assert!(WeatherSample::new(45.0, 75.0, 1.2, None).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_domain() {
        let err = WeatherSample::new(46.0, 45.0, 0.5, None).validate().unwrap_err();
        assert!(matches!(err, PredictionError::Validation(_)));

        let err = WeatherSample::new(30.0, 45.0, f64::NAN, None).validate().unwrap_err();
        assert!(err.to_string().contains("irradiation"));

        let err = WeatherSample::new(30.0, 45.0, 0.5, None).at(24, 0).validate().unwrap_err();
        assert!(err.to_string().contains("hour"));
    }
}
