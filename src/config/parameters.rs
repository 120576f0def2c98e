use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::constants::{DEFAULT_FINAL_TEMPERATURE, DEFAULT_INITIAL_TEMPERATURE};
use crate::error::{FarmError, FarmResult};

/// All tunable parameters of one optimization run.
///
/// Components receive this by reference at construction; there is no
/// process-wide configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    // Economics
    pub discount_rate: f64,
    /// Project lifetime in years
    pub project_lifetime: u32,
    pub number_of_turbines: usize,
    /// Rated capacity per turbine, MW
    pub turbine_rated_mw: f64,
    /// Procurement cost per MW of rated capacity
    pub turbine_cost_per_mw: f64,
    /// Annual operations cost as a fraction of procurement cost
    pub operation_cost_fraction: f64,
    /// Lease the land (recurring cost) instead of buying it (one-time)
    pub lease: bool,
    /// Fallback land purchase price per m2 for countries missing from
    /// the reference table
    pub land_cost_per_m2: f64,
    /// Fallback land lease price per m2 per year
    pub land_lease_per_m2: f64,
    pub price_of_cable_per_m: f64,
    pub price_of_substation: f64,
    /// Permitting cost as a fraction of procurement cost
    pub permitting_cost_fraction: f64,
    /// Miscellaneous overhead as a fraction of procurement cost
    pub other_cost_fraction: f64,
    /// Country used for the land-price lookup
    pub country: String,

    // Annealing
    /// Outer epoch count
    pub iterations: usize,
    pub initial_temperature: f64,
    pub final_temperature: f64,

    // Wind resource
    /// Height of the wind measurements, metres
    pub reference_height: f64,
    /// Turbine hub height the speeds are sheared to, metres
    pub hub_height: f64,
    /// Power-law shear exponent
    pub wind_shear: f64,
    /// Speed bin width, m/s
    pub wind_speed_resolution: f64,
    /// Direction bin width, degrees
    pub wind_direction_resolution: f64,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.05,
            project_lifetime: 25,
            number_of_turbines: 5,
            turbine_rated_mw: 5.0,
            turbine_cost_per_mw: 1_250_000.0,
            operation_cost_fraction: 0.025,
            lease: false,
            land_cost_per_m2: 2.5,
            land_lease_per_m2: 0.1,
            price_of_cable_per_m: 350.0,
            price_of_substation: 2_500_000.0,
            permitting_cost_fraction: 0.03,
            other_cost_fraction: 0.1,
            country: "Poland".to_string(),
            iterations: 20,
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            final_temperature: DEFAULT_FINAL_TEMPERATURE,
            reference_height: 100.0,
            hub_height: 120.0,
            wind_shear: 0.14,
            wind_speed_resolution: 1.0,
            wind_direction_resolution: 30.0,
        }
    }
}

impl FarmConfig {
    /// Loads parameters from a JSON file; keys absent from the file
    /// keep their documented defaults.
    pub fn from_file(path: &Path) -> FarmResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: FarmConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FarmResult<()> {
        if self.discount_rate <= 0.0 {
            return Err(FarmError::Configuration(format!(
                "discount rate must be positive, got {}",
                self.discount_rate
            )));
        }
        if self.project_lifetime == 0 {
            return Err(FarmError::Configuration(
                "project lifetime must be at least 1 year or the capital recovery factor is undefined"
                    .to_string(),
            ));
        }
        if self.number_of_turbines == 0 {
            return Err(FarmError::Configuration(
                "turbine count must be at least 1".to_string(),
            ));
        }
        if self.turbine_rated_mw <= 0.0 || self.turbine_cost_per_mw < 0.0 {
            return Err(FarmError::Configuration(
                "turbine capacity must be positive and cost non-negative".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(FarmError::Configuration(
                "iteration count must be at least 1".to_string(),
            ));
        }
        if self.initial_temperature <= 0.0
            || self.final_temperature <= 0.0
            || self.final_temperature >= self.initial_temperature
        {
            return Err(FarmError::Configuration(format!(
                "temperatures must satisfy 0 < final ({}) < initial ({})",
                self.final_temperature, self.initial_temperature
            )));
        }
        for (name, value) in [
            ("operation_cost_fraction", self.operation_cost_fraction),
            ("permitting_cost_fraction", self.permitting_cost_fraction),
            ("other_cost_fraction", self.other_cost_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FarmError::Configuration(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(FarmConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_lifetime_is_rejected() {
        let config = FarmConfig {
            project_lifetime: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FarmError::Configuration(_))
        ));
    }

    #[test]
    fn inverted_temperatures_are_rejected() {
        let config = FarmConfig {
            initial_temperature: 1e-5,
            final_temperature: 2e-3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: FarmConfig =
            serde_json::from_str(r#"{"number_of_turbines": 8, "lease": true}"#).unwrap();
        assert_eq!(config.number_of_turbines, 8);
        assert!(config.lease);
        assert_eq!(config.project_lifetime, 25);
    }
}
