use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::warn;

use crate::error::FarmResult;

/// Per-country average land prices per m2 (purchase) and per m2 per
/// year (lease), keyed by country name. Countries absent from the
/// table fall back to the configured defaults at lookup time.
#[derive(Debug, Clone)]
pub struct LandPriceTable {
    purchase: HashMap<String, f64>,
    lease: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct LandPriceRecord {
    country: String,
    price_per_m2: f64,
}

lazy_static! {
    static ref BUILTIN_PURCHASE: Vec<(&'static str, f64)> = vec![
        ("Poland", 2.6),
        ("Germany", 6.5),
        ("France", 1.5),
        ("Denmark", 4.4),
        ("Netherlands", 12.8),
        ("Spain", 2.0),
        ("Ireland", 5.9),
    ];
    static ref BUILTIN_LEASE: Vec<(&'static str, f64)> = vec![
        ("Poland", 0.08),
        ("Germany", 0.22),
        ("France", 0.05),
        ("Denmark", 0.15),
        ("Netherlands", 0.40),
        ("Spain", 0.07),
        ("Ireland", 0.19),
    ];
}

impl LandPriceTable {
    /// Built-in reference prices, used when no CSV tables are supplied.
    pub fn builtin() -> Self {
        Self {
            purchase: BUILTIN_PURCHASE
                .iter()
                .map(|(c, p)| (c.to_string(), *p))
                .collect(),
            lease: BUILTIN_LEASE
                .iter()
                .map(|(c, p)| (c.to_string(), *p))
                .collect(),
        }
    }

    /// Loads `country,price_per_m2` CSVs for purchase and lease prices.
    pub fn from_csv(purchase_path: &Path, lease_path: &Path) -> FarmResult<Self> {
        Ok(Self {
            purchase: read_price_csv(purchase_path)?,
            lease: read_price_csv(lease_path)?,
        })
    }

    /// Like `from_csv`, but falls back to the built-in table when the
    /// files are missing or unreadable.
    pub fn from_csv_or_builtin(purchase_path: &Path, lease_path: &Path) -> Self {
        match Self::from_csv(purchase_path, lease_path) {
            Ok(table) => table,
            Err(e) => {
                warn!("failed to load land price tables: {e}; using built-in reference prices");
                Self::builtin()
            }
        }
    }

    pub fn purchase_price(&self, country: &str) -> Option<f64> {
        self.purchase.get(country).copied()
    }

    pub fn lease_price(&self, country: &str) -> Option<f64> {
        self.lease.get(country).copied()
    }
}

fn read_price_csv(path: &Path) -> FarmResult<HashMap<String, f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(File::open(path)?);
    let mut prices = HashMap::new();
    for record in reader.deserialize() {
        let record: LandPriceRecord = record?;
        prices.insert(record.country, record.price_per_m2);
    }
    Ok(prices)
}
