//! Tracing initialisation for the service binary.
//!
//! `RUST_LOG` selects the filter (default `info`); `LOG_FORMAT=json` switches
//! to one JSON object per line.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Idempotent; later calls are ignored.
pub fn init_tracing(format: LogFormat) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        let _ = match format {
            LogFormat::Json => registry
                .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
                .try_init(),
            LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        };
    });
}
