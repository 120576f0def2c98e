use serde::Serialize;

use crate::config::constants::{CENTS_PER_UNIT, WH_PER_KWH};
use crate::config::parameters::FarmConfig;
use crate::data::land_prices::LandPriceTable;
use crate::error::{FarmError, FarmResult};

/// One-time and recurring expenditure of a candidate farm.
///
/// Land appears on exactly one side of the split: purchase is capital,
/// lease is operating.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CostBreakdown {
    pub turbine_cost: f64,
    pub cable_cost: f64,
    pub substation_cost: f64,
    pub permitting_cost: f64,
    pub other_cost: f64,
    pub land_cost: f64,
    pub capex: f64,
    pub opex: f64,
}

/// Economic model translating a layout's AEP and cable length into a
/// levelized cost of energy.
pub struct CostModel {
    config: FarmConfig,
    /// Standard annuity factor r(1+r)^N / ((1+r)^N - 1)
    crf: f64,
    land_unit_price: f64,
    /// Total site area the land price applies to, m2
    land_area: f64,
}

impl CostModel {
    pub fn new(
        config: &FarmConfig,
        land_prices: &LandPriceTable,
        land_area: f64,
    ) -> FarmResult<Self> {
        config.validate()?;
        if land_area <= 0.0 {
            return Err(FarmError::Domain(format!(
                "land area must be positive, got {land_area} m2"
            )));
        }

        let r = config.discount_rate;
        let growth = (1.0 + r).powi(config.project_lifetime as i32);
        let crf = r * growth / (growth - 1.0);

        // Country lookup happens once here, falling back to the
        // configured default unit price when the table has no entry.
        let land_unit_price = if config.lease {
            land_prices
                .lease_price(&config.country)
                .unwrap_or(config.land_lease_per_m2)
        } else {
            land_prices
                .purchase_price(&config.country)
                .unwrap_or(config.land_cost_per_m2)
        };

        Ok(Self {
            config: config.clone(),
            crf,
            land_unit_price,
            land_area,
        })
    }

    pub fn crf(&self) -> f64 {
        self.crf
    }

    pub fn breakdown(&self, cable_length: f64) -> CostBreakdown {
        let c = &self.config;
        let turbine_cost =
            c.number_of_turbines as f64 * c.turbine_rated_mw * c.turbine_cost_per_mw;
        let cable_cost = cable_length * c.price_of_cable_per_m;
        let permitting_cost = turbine_cost * c.permitting_cost_fraction;
        let other_cost = turbine_cost * c.other_cost_fraction;
        let land_cost = self.land_unit_price * self.land_area;

        let mut capex =
            turbine_cost + cable_cost + c.price_of_substation + permitting_cost + other_cost;
        let mut opex = turbine_cost * c.operation_cost_fraction;
        if c.lease {
            opex += land_cost;
        } else {
            capex += land_cost;
        }

        CostBreakdown {
            turbine_cost,
            cable_cost,
            substation_cost: c.price_of_substation,
            permitting_cost,
            other_cost,
            land_cost,
            capex,
            opex,
        }
    }

    /// Levelized cost of energy in cents per kWh.
    ///
    /// `aep_wh` is annual production in Wh; the two scale factors move
    /// the ratio from currency-per-Wh to cents-per-kWh.
    pub fn lcoe(&self, aep_wh: f64, cable_length: f64) -> FarmResult<f64> {
        if aep_wh <= 0.0 {
            return Err(FarmError::Domain(format!(
                "annual energy production must be positive to compute LCOE, got {aep_wh} Wh"
            )));
        }
        let costs = self.breakdown(cable_length);
        let annualized = costs.capex * self.crf + costs.opex;
        Ok(annualized / aep_wh * WH_PER_KWH * CENTS_PER_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(config: FarmConfig) -> CostModel {
        CostModel::new(&config, &LandPriceTable::builtin(), 1.0e6).unwrap()
    }

    #[test]
    fn crf_matches_the_annuity_formula() {
        let m = model(FarmConfig {
            discount_rate: 0.05,
            project_lifetime: 25,
            ..Default::default()
        });
        let expected = 0.05 * 1.05f64.powi(25) / (1.05f64.powi(25) - 1.0);
        assert!((m.crf() - expected).abs() < 1e-12);
        assert!((m.crf() - 0.070_952).abs() < 1e-5);
    }

    #[test]
    fn zero_aep_is_a_domain_error() {
        let m = model(FarmConfig::default());
        assert!(matches!(m.lcoe(0.0, 1000.0), Err(FarmError::Domain(_))));
    }

    #[test]
    fn lcoe_rises_with_cable_length() {
        let m = model(FarmConfig::default());
        let aep = 1.0e11;
        let short = m.lcoe(aep, 1_000.0).unwrap();
        let long = m.lcoe(aep, 10_000.0).unwrap();
        assert!(long > short);
    }

    #[test]
    fn lcoe_falls_with_aep() {
        let m = model(FarmConfig::default());
        let low = m.lcoe(1.0e10, 5_000.0).unwrap();
        let high = m.lcoe(1.0e11, 5_000.0).unwrap();
        assert!(high < low);
    }

    #[test]
    fn lcoe_rises_with_each_cost_coefficient() {
        let aep = 1.0e11;
        let cable = 5_000.0;
        let base = model(FarmConfig::default()).lcoe(aep, cable).unwrap();

        let dearer_turbines = model(FarmConfig {
            turbine_cost_per_mw: 2_000_000.0,
            ..Default::default()
        });
        assert!(dearer_turbines.lcoe(aep, cable).unwrap() > base);

        let dearer_substation = model(FarmConfig {
            price_of_substation: 9_000_000.0,
            ..Default::default()
        });
        assert!(dearer_substation.lcoe(aep, cable).unwrap() > base);

        let dearer_operations = model(FarmConfig {
            operation_cost_fraction: 0.1,
            ..Default::default()
        });
        assert!(dearer_operations.lcoe(aep, cable).unwrap() > base);

        let dearer_cable = model(FarmConfig {
            price_of_cable_per_m: 900.0,
            ..Default::default()
        });
        assert!(dearer_cable.lcoe(aep, cable).unwrap() > base);

        let dearer_permitting = model(FarmConfig {
            permitting_cost_fraction: 0.1,
            ..Default::default()
        });
        assert!(dearer_permitting.lcoe(aep, cable).unwrap() > base);

        let dearer_overhead = model(FarmConfig {
            other_cost_fraction: 0.3,
            ..Default::default()
        });
        assert!(dearer_overhead.lcoe(aep, cable).unwrap() > base);

        // land unit prices, compared within one (table-absent) country
        // so the configured defaults are the coefficients under test
        let cheap_land = model(FarmConfig {
            country: "Atlantis".to_string(),
            land_cost_per_m2: 1.0,
            ..Default::default()
        });
        let dear_land = model(FarmConfig {
            country: "Atlantis".to_string(),
            land_cost_per_m2: 5.0,
            ..Default::default()
        });
        assert!(dear_land.lcoe(aep, cable).unwrap() > cheap_land.lcoe(aep, cable).unwrap());

        let cheap_lease = model(FarmConfig {
            country: "Atlantis".to_string(),
            lease: true,
            land_lease_per_m2: 0.05,
            ..Default::default()
        });
        let dear_lease = model(FarmConfig {
            country: "Atlantis".to_string(),
            lease: true,
            land_lease_per_m2: 0.5,
            ..Default::default()
        });
        assert!(dear_lease.lcoe(aep, cable).unwrap() > cheap_lease.lcoe(aep, cable).unwrap());
    }

    #[test]
    fn land_cost_lands_on_the_right_side_of_the_split() {
        let buy = model(FarmConfig {
            lease: false,
            ..Default::default()
        })
        .breakdown(1_000.0);
        let lease = model(FarmConfig {
            lease: true,
            ..Default::default()
        })
        .breakdown(1_000.0);

        assert!(buy.capex > lease.capex);
        assert!(lease.opex > buy.opex);
    }

    #[test]
    fn unknown_country_uses_the_configured_default() {
        let m = model(FarmConfig {
            country: "Atlantis".to_string(),
            land_cost_per_m2: 3.0,
            lease: false,
            ..Default::default()
        });
        // land area is 1e6 m2 in the fixture
        assert!((m.breakdown(0.0).land_cost - 3.0e6).abs() < 1e-6);
    }
}
