use thiserror::Error;

/// Everything that can go wrong while loading or reading a config file.
///
/// None of these are returned as `Err` from the store; they are recorded and
/// reported through [`crate::config_log::Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Can not open config file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Reading line {line} of config file {path} failed: {source}")]
    Read {
        path: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Possible duplicate key {key} on line {line} in config file {path}")]
    DuplicateKey {
        path: String,
        key: String,
        line: usize,
    },

    #[error("Can not find {key} in config")]
    MissingKey { key: String },

    #[error("Can not parse {kind} from key {key} in config (value {value:?})")]
    Coercion {
        key: String,
        kind: &'static str,
        value: String,
    },
}

impl ConfigError {
    /// Duplicate keys are reported but never set the error flag.
    pub fn is_warning(&self) -> bool {
        matches!(self, ConfigError::DuplicateKey { .. })
    }

    /// Four letter code attached to the log event.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Open { .. } => "CFOP",
            ConfigError::Read { .. } => "CFRD",
            ConfigError::DuplicateKey { .. } => "CFDK",
            ConfigError::MissingKey { .. } => "CFMK",
            ConfigError::Coercion { .. } => "CFCV",
        }
    }
}
