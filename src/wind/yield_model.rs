use crate::config::constants::{
    CUT_IN_SPEED, CUT_OUT_SPEED, HOURS_PER_YEAR, RATED_SPEED, WATTS_PER_MW,
};
use crate::error::{FarmError, FarmResult};
use crate::geometry::point::ProjectedPoint;
use crate::wind::wind_rose::WindRose;

/// Annual-energy-production evaluator.
///
/// The optimization loop treats this as an opaque collaborator: it
/// hands over the full candidate layout and the wind climate and gets
/// back AEP in Wh/year. Failures propagate and abort the run; a
/// silently skipped evaluation would corrupt the acceptance history.
pub trait YieldModel {
    fn estimate_aep(&self, layout: &[ProjectedPoint], wind: &WindRose) -> FarmResult<f64>;
}

/// Built-in evaluator using a generic cut-in/rated/cut-out power
/// curve, with no wake interaction between turbines. Production per
/// turbine is the frequency-weighted expectation over the wind rose.
pub struct PowerCurveModel {
    rated_mw: f64,
}

impl PowerCurveModel {
    pub fn new(rated_mw: f64) -> FarmResult<Self> {
        if rated_mw <= 0.0 {
            return Err(FarmError::Configuration(format!(
                "rated turbine capacity must be positive, got {rated_mw} MW"
            )));
        }
        Ok(Self { rated_mw })
    }

    /// Output in watts at a given hub-height wind speed. Cubic ramp
    /// between cut-in and rated speed, flat to cut-out, zero beyond.
    fn power_at(&self, speed: f64) -> f64 {
        let rated_w = self.rated_mw * WATTS_PER_MW;
        if speed < CUT_IN_SPEED || speed > CUT_OUT_SPEED {
            0.0
        } else if speed >= RATED_SPEED {
            rated_w
        } else {
            let span = RATED_SPEED.powi(3) - CUT_IN_SPEED.powi(3);
            rated_w * (speed.powi(3) - CUT_IN_SPEED.powi(3)) / span
        }
    }
}

impl YieldModel for PowerCurveModel {
    fn estimate_aep(&self, layout: &[ProjectedPoint], wind: &WindRose) -> FarmResult<f64> {
        if layout.is_empty() {
            return Err(FarmError::Precondition(
                "cannot evaluate yield of an empty layout".to_string(),
            ));
        }
        let expected_power_w: f64 = wind
            .bins()
            .iter()
            .map(|b| b.frequency * self.power_at(b.speed))
            .sum();
        Ok(layout.len() as f64 * expected_power_w * HOURS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wind::wind_rose::WindBin;

    fn steady_rose(speed: f64) -> WindRose {
        WindRose::from_bins(vec![WindBin {
            direction: 0.0,
            speed,
            frequency: 1.0,
        }])
        .unwrap()
    }

    #[test]
    fn rated_wind_gives_rated_output() {
        let model = PowerCurveModel::new(5.0).unwrap();
        let layout = vec![ProjectedPoint::new(0.0, 0.0), ProjectedPoint::new(500.0, 0.0)];
        let aep = model.estimate_aep(&layout, &steady_rose(15.0)).unwrap();
        // 2 turbines x 5 MW x 8760 h
        assert!((aep - 2.0 * 5.0e6 * 8760.0).abs() < 1.0);
    }

    #[test]
    fn calm_and_storm_produce_nothing() {
        let model = PowerCurveModel::new(5.0).unwrap();
        let layout = vec![ProjectedPoint::new(0.0, 0.0)];
        assert_eq!(model.estimate_aep(&layout, &steady_rose(1.0)).unwrap(), 0.0);
        assert_eq!(model.estimate_aep(&layout, &steady_rose(28.0)).unwrap(), 0.0);
    }

    #[test]
    fn output_increases_with_speed_below_rated() {
        let model = PowerCurveModel::new(5.0).unwrap();
        let layout = vec![ProjectedPoint::new(0.0, 0.0)];
        let low = model.estimate_aep(&layout, &steady_rose(6.0)).unwrap();
        let high = model.estimate_aep(&layout, &steady_rose(10.0)).unwrap();
        assert!(low > 0.0);
        assert!(high > low);
    }

    #[test]
    fn empty_layout_is_a_precondition_error() {
        let model = PowerCurveModel::new(5.0).unwrap();
        assert!(model.estimate_aep(&[], &steady_rose(10.0)).is_err());
    }
}
