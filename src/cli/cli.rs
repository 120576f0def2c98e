use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "config.json", help = "Optimization parameters (JSON)")]
    config: String,

    #[arg(short, long, help = "Site boundary/exclusion polygons (JSON); demo site when omitted")]
    site: Option<String>,

    #[arg(short, long, help = "Hourly wind time series (CSV); synthetic climate when omitted")]
    weather: Option<String>,

    #[arg(long, default_value = "data/land_purchase_price.csv")]
    land_purchase_csv: String,

    #[arg(long, default_value = "data/land_lease_price.csv")]
    land_lease_csv: String,

    #[arg(short = 'n', long, help = "Override the configured epoch count")]
    iterations: Option<usize>,

    #[arg(short = 'o', long, default_value = "results")]
    output_dir: String,

    #[arg(long, help = "Random seed for a deterministic run")]
    seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

// Add getter methods for all fields
impl Args {
    pub fn config(&self) -> &str {
        &self.config
    }

    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn weather(&self) -> Option<&str> {
        self.weather.as_deref()
    }

    pub fn land_purchase_csv(&self) -> &str {
        &self.land_purchase_csv
    }

    pub fn land_lease_csv(&self) -> &str {
        &self.land_lease_csv
    }

    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
