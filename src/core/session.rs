use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::parameters::FarmConfig;
use crate::core::annealing::Annealer;
use crate::core::cables;
use crate::core::economics::{CostBreakdown, CostModel};
use crate::data::land_prices::LandPriceTable;
use crate::error::{FarmError, FarmResult};
use crate::geometry::point::{GeoPoint, ProjectedPoint};
use crate::geometry::projection::UtmProjection;
use crate::geometry::region::{geographic_centroid, Region};
use crate::geometry::sampling::FeasibleSampler;
use crate::wind::wind_rose::WindRose;
use crate::wind::yield_model::YieldModel;

/// Receiver of optimization progress, e.g. an incremental map
/// renderer. Layouts are handed over in geographic coordinates so the
/// sink never needs to know about the projected system.
pub trait ProgressSink {
    /// Called after every accepted step with the accepted layout.
    fn accepted_step(&mut self, epoch: usize, lcoe: f64, layout: &[GeoPoint]);
    /// Called once per completed epoch.
    fn epoch_finished(&mut self, epoch: usize, total_epochs: usize, best_lcoe: f64);
    /// Called once with the final result.
    fn run_finished(&mut self, result: &SessionResult);
}

/// Sink that discards all progress. Handy for tests and batch runs.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn accepted_step(&mut self, _epoch: usize, _lcoe: f64, _layout: &[GeoPoint]) {}
    fn epoch_finished(&mut self, _epoch: usize, _total_epochs: usize, _best_lcoe: f64) {}
    fn run_finished(&mut self, _result: &SessionResult) {}
}

/// Outcome of one full optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    /// cents per kWh
    pub best_lcoe: f64,
    /// Wh per year
    pub best_aep: f64,
    pub best_layout: Vec<GeoPoint>,
    pub best_cable_length: f64,
    pub best_costs: CostBreakdown,
    pub initial_lcoe: f64,
    pub accepted_steps: usize,
    pub evaluated_steps: usize,
    pub epsg: u32,
    pub feasible_area_m2: f64,
    /// LCOE of every evaluated candidate, initial layout first.
    pub lcoe_history: Vec<f64>,
    /// AEP of every evaluated candidate, initial layout first.
    pub aep_history: Vec<f64>,
    /// LCOE delta of every acceptance test after the initial layout.
    pub delta_history: Vec<f64>,
}

/// One optimization run: region construction, initial placement and
/// the annealing loop tying the yield, cable and cost models together.
///
/// Region geometry and turbine count are fixed at construction; only
/// the layout and the annealing state mutate afterwards.
pub struct LayoutSession {
    config: FarmConfig,
    projection: UtmProjection,
    region: Region,
    cost_model: CostModel,
}

impl LayoutSession {
    pub fn new(
        config: FarmConfig,
        land_prices: &LandPriceTable,
        boundaries: &[Vec<GeoPoint>],
        exclusions: &[Vec<GeoPoint>],
    ) -> FarmResult<Self> {
        config.validate()?;
        let centroid = geographic_centroid(boundaries)?;
        let projection = UtmProjection::for_centroid(&centroid)?;
        let region = Region::from_geographic(&projection, boundaries, exclusions)?;
        let cost_model = CostModel::new(&config, land_prices, region.feasible_area())?;
        info!(
            epsg = projection.epsg(),
            feasible_area_m2 = region.feasible_area(),
            "session initialized"
        );
        Ok(Self {
            config,
            projection,
            region,
            cost_model,
        })
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn projection(&self) -> &UtmProjection {
        &self.projection
    }

    fn to_geographic(&self, layout: &[ProjectedPoint]) -> Vec<GeoPoint> {
        layout.iter().map(|p| self.projection.unproject(p)).collect()
    }

    /// Evaluates one candidate layout through the full pipeline.
    fn evaluate(
        &self,
        layout: &[ProjectedPoint],
        wind: &WindRose,
        yield_model: &dyn YieldModel,
    ) -> FarmResult<(f64, f64, f64)> {
        let aep = yield_model.estimate_aep(layout, wind)?;
        if !aep.is_finite() || aep < 0.0 {
            return Err(FarmError::Evaluator(format!(
                "yield model returned invalid AEP {aep}"
            )));
        }
        let cable = cables::estimate(layout)?;
        let lcoe = self.cost_model.lcoe(aep, cable.total_length)?;
        Ok((lcoe, aep, cable.total_length))
    }

    /// Runs the full annealing search. Any evaluator or cost-model
    /// error aborts the run; a skipped step would corrupt the
    /// acceptance chain.
    pub fn run(
        &self,
        wind: &WindRose,
        yield_model: &dyn YieldModel,
        sink: &mut dyn ProgressSink,
        rng: &mut StdRng,
    ) -> FarmResult<SessionResult> {
        let n = self.config.number_of_turbines;
        let epochs = self.config.iterations;
        let sampler = FeasibleSampler::new(&self.region);

        // The search length scale follows the region's size.
        let initial_radius = self.region.feasible_area().sqrt();
        let mut annealer = Annealer::new(
            self.config.initial_temperature,
            self.config.final_temperature,
            epochs,
            initial_radius,
        )?;

        let mut layout = sampler.initial_layout(rng, n)?;
        let (initial_lcoe, initial_aep, _) = self.evaluate(&layout, wind, yield_model)?;
        annealer.observe(initial_lcoe, initial_aep, &layout);
        annealer.accept(initial_lcoe, rng);
        info!(lcoe = initial_lcoe, aep = initial_aep, "initial layout evaluated");
        sink.accepted_step(0, initial_lcoe, &self.to_geographic(&layout));

        let mut accepted_steps = 0usize;
        let mut evaluated_steps = 0usize;

        for epoch in 1..=epochs {
            for turbine in 0..n {
                let proposal = sampler.sample_local(rng, &layout[turbine], annealer.radius())?;
                let rollback = layout[turbine];
                layout[turbine] = proposal;

                let (lcoe, aep, cable_length) = self.evaluate(&layout, wind, yield_model)?;
                evaluated_steps += 1;

                if annealer.observe(lcoe, aep, &layout) {
                    info!(lcoe, aep, cable_length, epoch, "new best layout");
                }

                if annealer.accept(lcoe, rng) {
                    accepted_steps += 1;
                    debug!(lcoe, epoch, turbine, "step accepted");
                    sink.accepted_step(epoch, lcoe, &self.to_geographic(&layout));
                } else {
                    layout[turbine] = rollback;
                    debug!(lcoe, epoch, turbine, "step rejected");
                }
            }

            annealer.end_epoch(epoch);
            let best_lcoe = annealer
                .best()
                .map(|b| b.lcoe)
                .unwrap_or(f64::INFINITY);
            sink.epoch_finished(epoch, epochs, best_lcoe);
        }

        let best = annealer
            .best()
            .cloned()
            .ok_or_else(|| FarmError::Precondition("run produced no evaluated layout".to_string()))?;
        let best_cable = cables::estimate(&best.layout)?;
        let result = SessionResult {
            best_lcoe: best.lcoe,
            best_aep: best.aep,
            best_layout: self.to_geographic(&best.layout),
            best_cable_length: best_cable.total_length,
            best_costs: self.cost_model.breakdown(best_cable.total_length),
            initial_lcoe,
            accepted_steps,
            evaluated_steps,
            epsg: self.projection.epsg(),
            feasible_area_m2: self.region.feasible_area(),
            lcoe_history: annealer.lcoe_history().to_vec(),
            aep_history: annealer.aep_history().to_vec(),
            delta_history: annealer.delta_history().to_vec(),
        };
        info!(
            best_lcoe = result.best_lcoe,
            accepted = result.accepted_steps,
            evaluated = result.evaluated_steps,
            "optimization finished"
        );
        sink.run_finished(&result);
        Ok(result)
    }
}
