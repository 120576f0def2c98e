use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::{FarmError, FarmResult};
use crate::wind::wind_rose::WindSample;

#[derive(Debug, Deserialize)]
struct WeatherRecord {
    wind_speed: f64,
    wind_direction: f64,
}

/// Loads an hourly wind time series from a CSV with `wind_speed`
/// (m/s at the reference height) and `wind_direction` (degrees)
/// columns. Extra columns such as timestamps are ignored.
pub fn load_weather(path: &Path) -> FarmResult<Vec<WindSample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(File::open(path)?);
    let mut samples = Vec::new();
    for record in reader.deserialize() {
        let record: WeatherRecord = record?;
        if !(0.0..=360.0).contains(&record.wind_direction) || record.wind_speed < 0.0 {
            return Err(FarmError::Domain(format!(
                "invalid weather record: speed {} m/s, direction {} deg",
                record.wind_speed, record.wind_direction
            )));
        }
        samples.push(WindSample {
            speed: record.wind_speed,
            direction: record.wind_direction,
        });
    }
    if samples.is_empty() {
        return Err(FarmError::Precondition(format!(
            "weather file {} contains no samples",
            path.display()
        )));
    }
    Ok(samples)
}

/// Synthetic fallback climate for runs without a weather file: a
/// steady distribution peaking at moderate westerly winds.
pub fn default_weather() -> Vec<WindSample> {
    let mut samples = Vec::new();
    for (direction, hours) in [(210.0, 2), (240.0, 4), (270.0, 3), (300.0, 2), (90.0, 1)] {
        for speed in [4.0, 6.0, 8.0, 10.0, 12.0, 14.0] {
            for _ in 0..hours {
                samples.push(WindSample { speed, direction });
            }
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_weather_csv() {
        let path = std::env::temp_dir().join("windfarm_test_weather.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "wind_speed,wind_direction\n7.5,270\n12.0,245.5").unwrap();
        let samples = load_weather(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].speed, 7.5);
        assert_eq!(samples[1].direction, 245.5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn negative_speed_is_a_domain_error() {
        let path = std::env::temp_dir().join("windfarm_test_bad_weather.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "wind_speed,wind_direction\n-1.0,180").unwrap();
        assert!(matches!(load_weather(&path), Err(FarmError::Domain(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn default_weather_is_non_empty() {
        assert!(!default_weather().is_empty());
    }
}
