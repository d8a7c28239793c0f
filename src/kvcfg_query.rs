use std::io::{self, BufRead, Write};

use clap::Command;
use tracing::info;

use kvcfg::cli;
use kvcfg::config_log::init_tracing;
use kvcfg::config_query::process_command;
use kvcfg::ConfigStore;

fn prompt() -> io::Result<()> {
    print!("?> ");
    io::stdout().flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli::with_config_args(
        Command::new("kvcfg-query").about("Interactively query typed values from a config file"),
    )
    .get_matches();

    init_tracing(cli::log_level(&matches));

    let config_path = matches
        .get_one::<String>("config")
        .ok_or("config path missing")?;
    let store = ConfigStore::open_with(config_path, cli::parse_options(&matches));
    info!(
        "Loaded {} entries from {} (errors: {})",
        store.len(),
        store.source(),
        store.has_errors()
    );

    prompt()?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let command = line?;
        let command = command.trim();
        if command.is_empty() {
            prompt()?;
            continue;
        }
        if command.eq_ignore_ascii_case("QUIT") || command.eq_ignore_ascii_case("EXIT") {
            break;
        }

        print!("{}", process_command(command, &store));
        prompt()?;
    }

    Ok(())
}
