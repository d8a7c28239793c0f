use tracing::Level;

use crate::config_error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn from_str(level: &str) -> Self {
        match level.trim().to_uppercase().as_str() {
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info, // default
        }
    }

    pub fn as_tracing(&self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Installs a stderr `fmt` subscriber; stdout stays free for program output.
pub fn init_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(level.as_tracing())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Where a store sends its diagnostics. Silent unless `verbose` was requested.
#[derive(Clone, Copy, Debug, Default)]
pub struct Diagnostics {
    verbose: bool,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn report(&self, err: &ConfigError) {
        if !self.verbose {
            return;
        }
        let code = err.code();
        if err.is_warning() {
            tracing::warn!(target: "kvcfg::config", code, "{}", err);
        } else {
            tracing::error!(target: "kvcfg::config", code, "{}", err);
        }
    }
}
