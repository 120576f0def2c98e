use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::core::session::SessionResult;
use crate::error::FarmResult;

/// Writes the final result to a timestamped JSON file under
/// `output_dir`, creating the directory if needed. Returns the path
/// written.
pub fn export_result(result: &SessionResult, output_dir: &Path) -> FarmResult<PathBuf> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = output_dir.join(format!("layout_{timestamp}.json"));
    serde_json::to_writer_pretty(File::create(&path)?, result)?;
    info!(path = %path.display(), "result exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::economics::CostBreakdown;
    use crate::geometry::point::GeoPoint;

    #[test]
    fn writes_a_json_file() {
        let result = SessionResult {
            best_lcoe: 7.2,
            best_aep: 1.1e11,
            best_layout: vec![GeoPoint::new(15.1, 52.2)],
            best_cable_length: 0.0,
            best_costs: CostBreakdown {
                turbine_cost: 1.0,
                cable_cost: 0.0,
                substation_cost: 1.0,
                permitting_cost: 0.0,
                other_cost: 0.0,
                land_cost: 0.0,
                capex: 2.0,
                opex: 0.1,
            },
            initial_lcoe: 9.0,
            accepted_steps: 1,
            evaluated_steps: 1,
            epsg: 32633,
            feasible_area_m2: 1.0e6,
            lcoe_history: vec![9.0, 7.2],
            aep_history: vec![1.0e11, 1.1e11],
            delta_history: vec![-1.8],
        };
        let dir = std::env::temp_dir().join("windfarm_test_export");
        let path = export_result(&result, &dir).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("best_lcoe"));
        std::fs::remove_dir_all(dir).ok();
    }
}
