//! Optional `env_logger` setup for hosts that have no logger of their own.
//!
//! domkit itself only talks to the `log` facade. An application that already
//! installed a logger keeps it; [`init_logging`] then reports `false` and
//! domkit's records flow to the host logger.

use std::sync::OnceLock;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax (e.g. "info",
/// "domkit_ui=debug,domkit_markup=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter in effect: the explicit one, else `rust_log`, else `info`.
    pub fn filter_spec(&self, rust_log: Option<String>) -> String {
        self.env_filter
            .clone()
            .or(rust_log)
            .unwrap_or_else(|| "info".to_string())
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&self.filter_spec(std::env::var("RUST_LOG").ok()))
            .write_style(self.write_style);
        builder
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install `env_logger` as the global logger unless the host already has one.
///
/// Returns whether domkit's logger is the active one. Only the first call
/// does any work; later calls return the same answer.
pub fn init_logging(config: LoggingConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let installed = config.builder().try_init().is_ok();
        if installed {
            log::debug!("env_logger installed ({})", config.filter_spec(None));
        }
        installed
    })
}
