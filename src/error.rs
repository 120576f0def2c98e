use thiserror::Error;

/// Unified error type for the optimizer.
///
/// Geometry, cable and cost components fail fast with these variants;
/// the annealing loop never catches them, so a single bad evaluation
/// aborts the whole run instead of silently corrupting the acceptance
/// history.
#[derive(Error, Debug)]
pub enum FarmError {
    /// Required parameter missing or invalid
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operation invoked before required prior state exists
    #[error("precondition not met: {0}")]
    Precondition(String),

    /// Degenerate geometry or arithmetic (zero feasible area, zero AEP)
    #[error("domain error: {0}")]
    Domain(String),

    /// The external yield evaluator failed or returned invalid output
    #[error("yield evaluator failure: {0}")]
    Evaluator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FarmResult<T> = Result<T, FarmError>;
