use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging.
///
/// - Emits JSON lines on stderr so exported documents can go to stdout.
/// - Honors `RUST_LOG`, defaulting to `info`. `RUST_LOG=debug` also prints
///   every resolved docket.
/// - Bridges `log` records into `tracing`.
pub fn init_tracing(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()?;

    // Ignore errors if a logger was already set (e.g., tests).
    let _ = tracing_log::LogTracer::init();

    tracing::debug!(service = service_name, "tracing initialized");
    Ok(())
}
