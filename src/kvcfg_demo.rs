use clap::Command;
use tracing::{error, warn};

use kvcfg::cli;
use kvcfg::config_log::init_tracing;
use kvcfg::ConfigStore;

// Demo reads a handful of keys the way an application would at startup and
// exits non-zero when a required one is missing or malformed
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli::with_config_args(
        Command::new("kvcfg-demo").about("Load a key=value config file and print a few values"),
    )
    .get_matches();

    init_tracing(cli::log_level(&matches));

    let config_path = matches
        .get_one::<String>("config")
        .ok_or("config path missing")?;
    let config = ConfigStore::open_with(config_path, cli::parse_options(&matches));

    let (_, foo) = config.get_int("foo");
    let (_, bar) = config.get_string("bar");
    let (_, pi) = config.get_double("pi");

    // Optional keys never set the error flag
    let (found, _) = config.get_string_optional("notExisting");
    if !found {
        warn!("Optional key not found in config!");
    }

    let (_, fallback) = config.get_string_or("notExisting", "fallback");

    if config.has_errors() {
        error!("Configuration incomplete!");
        std::process::exit(1);
    }

    println!("{}", bar);
    println!("{}", foo);
    println!("{}", pi);
    println!("{}", fallback);

    Ok(())
}
