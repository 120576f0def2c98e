// Annealing Constants
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 2.0e-3;
pub const DEFAULT_FINAL_TEMPERATURE: f64 = 1.0e-5;
pub const RADIUS_FLOOR_FRACTION: f64 = 0.1;          // search radius never shrinks below 10% of initial

// Sampling Constants
pub const OVERSAMPLING_FACTOR: usize = 2;            // candidates drawn per turbine in initial placement
pub const MAX_SAMPLING_ATTEMPTS: usize = 100_000;    // rejection-sampling guard before Domain error

// Wind Resource Constants
pub const MAX_WIND_SPEED: f64 = 30.0;                // m/s, speeds above this are clipped
pub const HOURS_PER_YEAR: f64 = 8760.0;

// Turbine Power Curve Constants
pub const CUT_IN_SPEED: f64 = 3.0;                   // m/s
pub const RATED_SPEED: f64 = 12.0;                   // m/s
pub const CUT_OUT_SPEED: f64 = 25.0;                 // m/s

// Unit Conversions
pub const WH_PER_KWH: f64 = 1000.0;
pub const CENTS_PER_UNIT: f64 = 100.0;
pub const WATTS_PER_MW: f64 = 1.0e6;

// Projection Constants (WGS84 ellipsoid)
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;  // metres
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;
pub const UTM_SCALE_FACTOR: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500_000.0;
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;
