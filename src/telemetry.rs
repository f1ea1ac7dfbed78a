use error_stack::{Result, ResultExt};
use std::io::IsTerminal;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{MakeWriter, TestWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{self, LoggingStyle};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

/// Installs the global subscriber: a console layer formatted
/// by `logging.style` and filtered by `logging.targets`, plus the
/// [`ErrorLayer`](tracing_error::ErrorLayer) that lets HTTP errors
/// capture the span trace they were raised in.
pub fn init(cfg: &config::Logging) -> Result<(), TracingInitError> {
    let ansi = std::io::stderr().is_terminal();
    let console = console_layer::<Registry, _>(std::io::stderr, ansi, cfg.style, &cfg.targets);

    let registry = Registry::default()
        .with(console)
        .with(tracing_error::ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")?;

    if std::env::var("RUST_LOG").is_ok() && !cfg.targets.is_empty() {
        tracing::warn!("Both `RUST_LOG` and `logging.targets` are set, `logging.targets` wins");
    }

    Ok(())
}

/// Test variant of [`init`] writing through the test harness.
/// Calling it more than once is harmless.
pub fn init_for_tests() {
    let console = console_layer::<Registry, _>(TestWriter::default(), false, LoggingStyle::Full, "");
    let registry = Registry::default()
        .with(console)
        .with(tracing_error::ErrorLayer::default());

    tracing::subscriber::set_global_default(registry).ok();
}

/// Console output in the given style. Compact output leaves out event
/// targets, pretty output spreads each event over several lines.
fn console_layer<S, W>(
    writer: W,
    ansi: bool,
    style: LoggingStyle,
    targets: &str,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_timer(ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_writer(writer);

    let layer: Box<dyn Layer<S> + Send + Sync> = match style {
        LoggingStyle::Compact => layer.compact().with_target(false).boxed(),
        LoggingStyle::Full => layer.boxed(),
        LoggingStyle::Pretty => layer.pretty().boxed(),
    };

    layer.with_filter(make_env_filter(targets)).boxed()
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let targets = if targets.is_empty() {
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default()
    } else {
        targets.to_string()
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
