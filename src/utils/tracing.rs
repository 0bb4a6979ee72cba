use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Installs the global tracing subscriber and color-eyre hooks. Call once at
/// startup; `RUST_LOG` controls the filter, defaulting to `info`.
pub fn init_tracing() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .init();

    color_eyre::install()
}
