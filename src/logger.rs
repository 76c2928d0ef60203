use std::result::Result;

use snafu::ResultExt;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{registry, EnvFilter, Layer};

use crate::config::{Config, ConsoleFormat};
use crate::error::{ApplicationError, InitializeLoggerSnafu, InvalidLogFilterSnafu};

const LOG_FILE: &str = "showreel.log";

/// Install the global subscriber: one console layer and one daily rolling JSON file in
/// `config.log_dir`, both behind the same filter.
///
/// The returned guard flushes the file writer when dropped, so keep it alive until shutdown.
pub fn init(config: &Config) -> Result<WorkerGuard, ApplicationError> {
    let filter = filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &config.log_filter)?;
    let (writer, guard) = file_writer(config);

    let subscriber = registry()
        .with(filter)
        .with(console_layer(config.log_console))
        .with(layer().with_ansi(false).json().with_writer(writer));
    tracing::subscriber::set_global_default(subscriber).context(InitializeLoggerSnafu)?;

    tracing::debug!(dir = %config.log_dir.display(), "logging to `{LOG_FILE}`");
    Ok(guard)
}

/// `RUST_LOG` wins over the configured directives when it is set.
fn filter(from_env: Option<String>, configured: &str) -> Result<EnvFilter, ApplicationError> {
    let directives = from_env.as_deref().unwrap_or(configured);
    EnvFilter::try_new(directives).context(InvalidLogFilterSnafu { directives })
}

fn file_writer(config: &Config) -> (NonBlocking, WorkerGuard) {
    let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE);
    tracing_appender::non_blocking(appender)
}

fn console_layer<S>(format: ConsoleFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    match format {
        ConsoleFormat::Pretty => layer().pretty().with_writer(std::io::stdout).boxed(),
        ConsoleFormat::Compact => layer().compact().with_writer(std::io::stdout).boxed(),
        ConsoleFormat::Json => layer().json().with_writer(std::io::stdout).boxed(),
    }
}
