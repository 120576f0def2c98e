use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use windfarm::cli::cli::Args;
use windfarm::config::parameters::FarmConfig;
use windfarm::core::session::{LayoutSession, ProgressSink, SessionResult};
use windfarm::data::{land_prices::LandPriceTable, site_loader, weather_loader};
use windfarm::geometry::point::GeoPoint;
use windfarm::utils::{export, logging};
use windfarm::wind::wind_rose::WindRose;
use windfarm::wind::yield_model::PowerCurveModel;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.debug_logging());

    println!("Wind Farm Layout Optimizer");

    // Every input falls back to built-in data so a bare invocation
    // still produces a full demo run.
    let mut config = match FarmConfig::from_file(Path::new(args.config())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}. Using default parameters.", args.config(), e);
            FarmConfig::default()
        }
    };
    if let Some(iterations) = args.iterations() {
        config.iterations = iterations;
    }

    let site = match args.site() {
        Some(path) => site_loader::load_site(Path::new(path))
            .with_context(|| format!("failed to load site file {path}"))?,
        None => {
            println!("No site file given, optimizing the built-in demo site");
            site_loader::default_site()
        }
    };

    let samples = match args.weather() {
        Some(path) => weather_loader::load_weather(Path::new(path))
            .with_context(|| format!("failed to load weather file {path}"))?,
        None => {
            println!("No weather file given, using the synthetic default climate");
            weather_loader::default_weather()
        }
    };
    let wind = WindRose::from_samples(
        &samples,
        config.reference_height,
        config.hub_height,
        config.wind_shear,
        config.wind_speed_resolution,
        config.wind_direction_resolution,
    )?;

    let land_prices = LandPriceTable::from_csv_or_builtin(
        Path::new(args.land_purchase_csv()),
        Path::new(args.land_lease_csv()),
    );

    let yield_model = PowerCurveModel::new(config.turbine_rated_mw)?;
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let epochs = config.iterations;
    let session = LayoutSession::new(config, &land_prices, &site.boundaries, &site.exclusions)?;
    let mut sink = ConsoleSink::new(epochs);
    let result = session.run(&wind, &yield_model, &mut sink, &mut rng)?;

    let path = export::export_result(&result, Path::new(args.output_dir()))?;
    println!("Result written to {}", path.display());

    Ok(())
}

/// Progress sink rendering an epoch bar plus a final summary.
struct ConsoleSink {
    bar: ProgressBar,
}

impl ConsoleSink {
    fn new(epochs: usize) -> Self {
        let bar = ProgressBar::new(epochs as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} epoch {pos}/{len} {msg}")
                .expect("static template always parses"),
        );
        Self { bar }
    }
}

impl ProgressSink for ConsoleSink {
    fn accepted_step(&mut self, _epoch: usize, lcoe: f64, _layout: &[GeoPoint]) {
        self.bar.set_message(format!("LCOE {lcoe:.3} ct/kWh"));
    }

    fn epoch_finished(&mut self, _epoch: usize, _total_epochs: usize, best_lcoe: f64) {
        self.bar.set_message(format!("best {best_lcoe:.3} ct/kWh"));
        self.bar.inc(1);
    }

    fn run_finished(&mut self, result: &SessionResult) {
        self.bar.finish_and_clear();
        println!("\n=== OPTIMIZATION SUMMARY ===");
        println!("Projected system:   EPSG:{}", result.epsg);
        println!("Feasible area:      {:.2} km2", result.feasible_area_m2 / 1.0e6);
        println!("Initial LCOE:       {:.3} ct/kWh", result.initial_lcoe);
        println!("Best LCOE:          {:.3} ct/kWh", result.best_lcoe);
        println!("Best AEP:           {:.2} GWh/y", result.best_aep / 1.0e9);
        println!("Cable length:       {:.0} m", result.best_cable_length);
        println!("Capex:              {:.2} M", result.best_costs.capex / 1.0e6);
        println!("Opex:               {:.2} M/y", result.best_costs.opex / 1.0e6);
        println!(
            "Accepted steps:     {}/{}",
            result.accepted_steps, result.evaluated_steps
        );
        println!("Turbine positions (lon, lat):");
        for p in &result.best_layout {
            println!("  {:.6}, {:.6}", p.lon, p.lat);
        }
    }
}
