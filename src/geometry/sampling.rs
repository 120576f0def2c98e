use rand::rngs::StdRng;
use rand::Rng;

use crate::config::constants::{MAX_SAMPLING_ATTEMPTS, OVERSAMPLING_FACTOR};
use crate::error::{FarmError, FarmResult};
use crate::geometry::point::ProjectedPoint;
use crate::geometry::region::Region;

/// Rejection sampler over a region's feasible area.
///
/// Region construction already guarantees positive feasible area, so
/// each loop terminates with probability 1. The attempt cap turns a
/// pathologically thin region into a reported Domain error rather than
/// a stall.
pub struct FeasibleSampler<'a> {
    region: &'a Region,
}

impl<'a> FeasibleSampler<'a> {
    pub fn new(region: &'a Region) -> Self {
        Self { region }
    }

    /// Uniform draw over the boundary bounding box until a feasible
    /// point comes up. Used only for initial placement.
    pub fn sample_global(&self, rng: &mut StdRng) -> FarmResult<ProjectedPoint> {
        let (min, max) = self.region.bounds();
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let p = ProjectedPoint::new(
                rng.gen_range(min.x..max.x),
                rng.gen_range(min.y..max.y),
            );
            if self.region.is_feasible(&p) {
                return Ok(p);
            }
        }
        Err(FarmError::Domain(format!(
            "no feasible point found in {} global draws; feasible area may be vanishingly thin",
            MAX_SAMPLING_ATTEMPTS
        )))
    }

    /// Uniform draw within a square of half-width `radius` around
    /// `anchor` until a feasible point comes up. Used for perturbation
    /// moves.
    pub fn sample_local(
        &self,
        rng: &mut StdRng,
        anchor: &ProjectedPoint,
        radius: f64,
    ) -> FarmResult<ProjectedPoint> {
        if radius <= 0.0 {
            return Err(FarmError::Domain(format!(
                "local sampling radius must be positive, got {radius}"
            )));
        }
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let p = ProjectedPoint::new(
                rng.gen_range(anchor.x - radius..anchor.x + radius),
                rng.gen_range(anchor.y - radius..anchor.y + radius),
            );
            if self.region.is_feasible(&p) {
                return Ok(p);
            }
        }
        Err(FarmError::Domain(format!(
            "no feasible point found in {} local draws around ({:.1}, {:.1}) with radius {:.1}",
            MAX_SAMPLING_ATTEMPTS, anchor.x, anchor.y, radius
        )))
    }

    /// Draws `n` feasible points by over-sampling 2×n candidates per
    /// batch and filtering, which amortizes the rejection cost versus
    /// one-at-a-time draws.
    pub fn initial_layout(&self, rng: &mut StdRng, n: usize) -> FarmResult<Vec<ProjectedPoint>> {
        if n == 0 {
            return Err(FarmError::Configuration(
                "turbine count must be at least 1".to_string(),
            ));
        }
        let (min, max) = self.region.bounds();
        let mut layout = Vec::with_capacity(n);
        let mut batches = 0usize;
        while layout.len() < n {
            for _ in 0..(n * OVERSAMPLING_FACTOR) {
                let p = ProjectedPoint::new(
                    rng.gen_range(min.x..max.x),
                    rng.gen_range(min.y..max.y),
                );
                if self.region.is_feasible(&p) {
                    layout.push(p);
                    if layout.len() == n {
                        break;
                    }
                }
            }
            batches += 1;
            if batches * n * OVERSAMPLING_FACTOR > MAX_SAMPLING_ATTEMPTS {
                return Err(FarmError::Domain(format!(
                    "initial placement exhausted {} candidate draws with only {}/{} feasible",
                    batches * n * OVERSAMPLING_FACTOR,
                    layout.len(),
                    n
                )));
            }
        }
        Ok(layout)
    }
}
