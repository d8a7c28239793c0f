pub mod cli;
pub mod config;
pub mod config_error;
pub mod config_log;
pub mod config_query;
pub mod config_value;

pub use config::{ConfigStore, ParseOptions};
pub use config_error::ConfigError;
pub use config_value::{ConfigValue, Lookup};
