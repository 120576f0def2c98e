use rand::rngs::StdRng;
use rand::Rng;

use crate::config::constants::RADIUS_FLOOR_FRACTION;
use crate::error::{FarmError, FarmResult};
use crate::geometry::point::ProjectedPoint;

/// Best layout found so far, kept as a deep snapshot so it survives
/// further mutation of the working layout.
#[derive(Debug, Clone)]
pub struct BestSolution {
    pub lcoe: f64,
    pub aep: f64,
    pub layout: Vec<ProjectedPoint>,
}

/// Simulated-annealing state: temperature, search radius, the last
/// accepted LCOE and the best solution observed.
///
/// Cooling cadence: the temperature and the search radius both update
/// once per epoch (one full pass over all turbines), not per inner
/// step. The cooling ratio is chosen so the temperature decays
/// geometrically from `initial_temperature` to `final_temperature`
/// over the configured epoch count. The radius shrinks linearly,
/// reaching its floor of 10% of the initial value at the final epoch.
pub struct Annealer {
    temperature: f64,
    cooling: f64,
    epochs: usize,
    initial_radius: f64,
    radius: f64,
    prev_lcoe: f64,
    best: Option<BestSolution>,
    lcoe_history: Vec<f64>,
    delta_history: Vec<f64>,
    aep_history: Vec<f64>,
}

impl Annealer {
    pub fn new(
        initial_temperature: f64,
        final_temperature: f64,
        epochs: usize,
        initial_radius: f64,
    ) -> FarmResult<Self> {
        if epochs == 0 {
            return Err(FarmError::Configuration(
                "annealing needs at least one epoch".to_string(),
            ));
        }
        if initial_temperature <= 0.0
            || final_temperature <= 0.0
            || final_temperature >= initial_temperature
        {
            return Err(FarmError::Configuration(format!(
                "temperatures must satisfy 0 < final ({final_temperature}) < initial ({initial_temperature})"
            )));
        }
        if initial_radius <= 0.0 {
            return Err(FarmError::Domain(format!(
                "initial search radius must be positive, got {initial_radius}"
            )));
        }
        let cooling = (final_temperature / initial_temperature).powf(1.0 / epochs as f64);
        Ok(Self {
            temperature: initial_temperature,
            cooling,
            epochs,
            initial_radius,
            radius: initial_radius,
            prev_lcoe: f64::INFINITY,
            best: None,
            lcoe_history: Vec::new(),
            delta_history: Vec::new(),
            aep_history: Vec::new(),
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn previous_lcoe(&self) -> f64 {
        self.prev_lcoe
    }

    pub fn best(&self) -> Option<&BestSolution> {
        self.best.as_ref()
    }

    pub fn lcoe_history(&self) -> &[f64] {
        &self.lcoe_history
    }

    pub fn delta_history(&self) -> &[f64] {
        &self.delta_history
    }

    pub fn aep_history(&self) -> &[f64] {
        &self.aep_history
    }

    /// Records a candidate evaluation and updates the best-so-far
    /// tracking. Returns true when this is a strict improvement.
    pub fn observe(&mut self, lcoe: f64, aep: f64, layout: &[ProjectedPoint]) -> bool {
        self.lcoe_history.push(lcoe);
        self.aep_history.push(aep);
        let improved = self.best.as_ref().map_or(true, |b| lcoe < b.lcoe);
        if improved {
            self.best = Some(BestSolution {
                lcoe,
                aep,
                layout: layout.to_vec(),
            });
        }
        improved
    }

    /// Metropolis acceptance test against the last accepted LCOE.
    /// Non-positive delta accepts unconditionally; positive delta
    /// accepts with probability exp(-delta / temperature). On accept
    /// the candidate becomes the new reference.
    pub fn accept(&mut self, lcoe: f64, rng: &mut StdRng) -> bool {
        let delta = lcoe - self.prev_lcoe;
        // the bootstrap candidate compares against infinity; that
        // delta is not a real step and stays out of the diagnostics
        if delta.is_finite() {
            self.delta_history.push(delta);
        }
        let accepted = delta <= 0.0 || rng.gen::<f64>() < (-delta / self.temperature).exp();
        if accepted {
            self.prev_lcoe = lcoe;
        }
        accepted
    }

    /// Per-epoch update: geometric cooling and linear radius shrink.
    /// `completed` is the number of epochs finished so far (1-based).
    pub fn end_epoch(&mut self, completed: usize) {
        self.temperature *= self.cooling;
        let progress = (completed as f64 / self.epochs as f64).min(1.0);
        let scale = 1.0 - (1.0 - RADIUS_FLOOR_FRACTION) * progress;
        self.radius = self.initial_radius * scale.max(RADIUS_FLOOR_FRACTION);
    }
}
