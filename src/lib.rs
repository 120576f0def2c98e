// Module declarations for the wind farm layout optimizer

// Core optimization modules
pub mod core {
    pub mod annealing;
    pub mod cables;
    pub mod economics;
    pub mod session;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod parameters;
}

// Geometry and feasibility
pub mod geometry {
    pub mod point;
    pub mod polygon;
    pub mod projection;
    pub mod region;
    pub mod sampling;
}

// Wind resource handling
pub mod wind {
    pub mod wind_rose;
    pub mod yield_model;
}

// Data loaders
pub mod data {
    pub mod land_prices;
    pub mod site_loader;
    pub mod weather_loader;
}

// Utility functions
pub mod utils {
    pub mod export;
    pub mod logging;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

pub mod error;

// Re-export commonly used items
pub use crate::core::session::LayoutSession;
pub use crate::error::{FarmError, FarmResult};
pub use crate::geometry::point::{GeoPoint, ProjectedPoint};
pub use crate::geometry::region::Region;
pub use crate::wind::yield_model::YieldModel;
