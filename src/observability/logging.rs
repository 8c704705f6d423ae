//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives when neither `RUST_LOG` nor config set a level.
pub const DEFAULT_DIRECTIVES: &str = "jsonp_gateway=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `log_level`; an empty `log_level` falls back to
/// [`DEFAULT_DIRECTIVES`].
pub fn init(log_level: &str) {
    let fallback = if log_level.is_empty() {
        DEFAULT_DIRECTIVES.to_string()
    } else {
        format!("jsonp_gateway={log_level},tower_http={log_level}")
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
