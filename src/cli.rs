//! Argument handling shared by the `kvcfg-*` binaries.

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::config::ParseOptions;
use crate::config_log::LogLevel;

/// Adds the config path and parse flags every binary accepts.
pub fn with_config_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config")
            .help("Path to config file")
            .required(true)
            .index(1),
    )
    .arg(
        Arg::new("delim")
            .long("delim")
            .help("Character separating key from value (default: =)")
            .value_parser(single_char),
    )
    .arg(
        Arg::new("comment")
            .long("comment")
            .help("Character starting a comment (default: #)")
            .value_parser(single_char),
    )
    .arg(
        Arg::new("verbose")
            .long("verbose")
            .short('v')
            .help("Log parse and lookup problems to stderr")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("log-level")
            .long("log-level")
            .help("DEBUG, INFO, WARN or ERROR (default: INFO)")
            .default_value("INFO"),
    )
}

pub fn parse_options(matches: &ArgMatches) -> ParseOptions {
    let mut options = ParseOptions::default().with_verbose(matches.get_flag("verbose"));
    if let Some(delim) = matches.get_one::<char>("delim") {
        options = options.with_delimiter(*delim);
    }
    if let Some(comment) = matches.get_one::<char>("comment") {
        options = options.with_comment(*comment);
    }
    options
}

pub fn log_level(matches: &ArgMatches) -> LogLevel {
    matches
        .get_one::<String>("log-level")
        .map(|level| LogLevel::from_str(level))
        .unwrap_or(LogLevel::Info)
}

fn single_char(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got {:?}", value)),
    }
}
