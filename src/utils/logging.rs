use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the
/// defaults; `debug` raises the crate's own level to DEBUG so every
/// accept/reject decision is visible.
pub fn init_logging(debug: bool) {
    let crate_level = if debug { "windfarm=debug" } else { "windfarm=info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive(crate_level.parse().expect("static directive always parses"));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set up tracing subscriber");
}
