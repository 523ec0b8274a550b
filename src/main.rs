mod api;
mod cli;
mod fetcher;
mod output;
mod rate_limit;
mod types;
mod units;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use cli::{Args, Config};
use colored::Colorize;
use fetcher::FetchOptions;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_filter = if debug { "warn,repo_size=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<ExitCode> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return Ok(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            });
        }
    };
    let config = Config::from(args);

    init_logging(config.debug);

    let client = api::ForgeClient::new(&config.api_url, config.token.clone())?;
    let options = FetchOptions {
        unit: &config.unit,
        full_size: config.full_size,
    };

    // Process repositories one at a time, in the order given
    let mut results = Vec::with_capacity(config.repos.len());
    let mut failed = 0;
    for url in &config.repos {
        match fetcher::fetch_repository(&client, url, &options) {
            Ok(info) => results.push(info),
            Err(e) => {
                eprintln!("{}: {}: {}", "Error".red(), url, e);
                failed += 1;
            }
        }
    }

    output::print_results(&results, config.json, config.verbose)?;

    if client.has_token() {
        rate_limit::report(&client, config.json);
    }

    Ok(if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
