//! Logging and tracing initialization.

use tracing_subscriber::{EnvFilter, filter::ParseError, fmt};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`; an unparsable level falls back to `info`
/// with a warning. Logs go to stderr so stdout stays usable for command output. Calling this
/// twice keeps the first subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => match level_filter(&config.level) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new("info"), Some(e)),
        },
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
    .is_ok();

    if let (true, Some(e)) = (installed, rejected) {
        tracing::warn!(level = %config.level, error = %e, "invalid log level, using info");
    }
}

fn level_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
