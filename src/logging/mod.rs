//! Structured logging via `tracing`.
//!
//! The library itself only emits through the `tracing` macros; hosts that
//! already install a subscriber (a bevy app, a game server) can ignore this
//! module entirely. For standalone use, `init_tracing_default` installs a
//! compact subscriber once, honoring `RUST_LOG` when set.

use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log verbosity for one filter entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Subscriber configuration: a default level plus per-module overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("gridwave_core::enemy".to_string(), LogLevel::Debug),
                ("gridwave_core::registry".to_string(), LogLevel::Info),
                ("gridwave_core::wave".to_string(), LogLevel::Info),
            ],
            show_targets: true,
        }
    }
}

impl TracingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the default subscriber (idempotent - safe to call repeatedly).
pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Install a subscriber from `config` (idempotent - first call wins).
/// `RUST_LOG`, when present, overrides the configured filter.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .compact();

        // Ignore failure if the host installed a subscriber first
        let _ = subscriber.try_init();
    });
}
