use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::constants::MAX_WIND_SPEED;
use crate::error::{FarmError, FarmResult};

/// One hourly observation at the reference height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindSample {
    /// m/s at the reference height
    pub speed: f64,
    /// meteorological degrees, 0..360
    pub direction: f64,
}

/// One (direction-bin, speed-bin) cell of the discretized climate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindBin {
    pub direction: f64,
    pub speed: f64,
    pub frequency: f64,
}

/// Discretized wind climate: probability mass per
/// (direction-bin, speed-bin) cell, summing to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindRose {
    bins: Vec<WindBin>,
}

impl WindRose {
    /// Builds the rose from an hourly series: speeds are clipped at
    /// 30 m/s, shear-corrected from `reference_height` to `hub_height`
    /// with the power-law exponent `alpha`, then rounded into the
    /// configured speed/direction resolutions (360° wraps to 0°).
    pub fn from_samples(
        samples: &[WindSample],
        reference_height: f64,
        hub_height: f64,
        alpha: f64,
        speed_resolution: f64,
        direction_resolution: f64,
    ) -> FarmResult<Self> {
        if samples.is_empty() {
            return Err(FarmError::Precondition(
                "cannot build a wind rose from an empty time series".to_string(),
            ));
        }
        if speed_resolution <= 0.0 || direction_resolution <= 0.0 {
            return Err(FarmError::Configuration(format!(
                "wind bin resolutions must be positive, got ws={speed_resolution} wd={direction_resolution}"
            )));
        }
        if reference_height <= 0.0 || hub_height <= 0.0 {
            return Err(FarmError::Configuration(
                "reference and hub heights must be positive".to_string(),
            ));
        }

        let shear = (hub_height / reference_height).powf(alpha);
        let wrap = (360.0 / direction_resolution).round() as i64;
        // BTreeMap keyed by integer bin indices keeps the cells ordered
        // and merges duplicates without float-keyed hashing.
        let mut counts: BTreeMap<(i64, i64), u64> = BTreeMap::new();
        for s in samples {
            let speed = (s.speed.min(MAX_WIND_SPEED) * shear).max(0.0);
            let ws_bin = (speed / speed_resolution).round() as i64;
            let mut wd_bin = (s.direction.rem_euclid(360.0) / direction_resolution).round() as i64;
            if wd_bin >= wrap {
                wd_bin = 0;
            }
            *counts.entry((wd_bin, ws_bin)).or_insert(0) += 1;
        }

        let total = samples.len() as f64;
        let bins = counts
            .into_iter()
            .map(|((wd, ws), count)| WindBin {
                direction: wd as f64 * direction_resolution,
                speed: ws as f64 * speed_resolution,
                frequency: count as f64 / total,
            })
            .collect();
        Ok(Self { bins })
    }

    /// A rose straight from pre-computed bins; frequencies must sum
    /// to 1 within tolerance.
    pub fn from_bins(bins: Vec<WindBin>) -> FarmResult<Self> {
        let total: f64 = bins.iter().map(|b| b.frequency).sum();
        if bins.is_empty() || (total - 1.0).abs() > 1e-6 {
            return Err(FarmError::Domain(format!(
                "wind rose frequencies must sum to 1, got {total}"
            )));
        }
        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[WindBin] {
        &self.bins
    }
}
