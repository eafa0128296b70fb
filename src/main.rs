//! roboaslain - Aslain's Modpack configuration installer
//!
//! Locates the Aslain's Modpack directory (known locations, then a bounded
//! disk scan, then a manual prompt), downloads the user's configuration,
//! backs up the previous one, installs the new one, and launches the modpack
//! installer with it preloaded. `--update-aslain` downloads and installs a
//! new version of the modpack installer itself.

use clap::Parser;
use console::style;

mod backup;
mod cli;
mod commands;
mod config;
mod download;
mod error;
mod finder;
mod install;
mod launch;
mod logging;
mod outcome;
mod prompt;
mod temp;

use cli::Cli;
use config::AppConfig;
use error::exit_codes;
use outcome::Outcome;

fn main() {
    let cli = Cli::parse();
    let log = logging::init(cli.verbose);

    println!(
        "{}",
        style("Robo Aslain Config Installer v2.0 - by Robocnop")
            .green()
            .bold()
    );
    println!();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run(&cli)));
    let code = match result {
        Ok(code) => code,
        Err(_) => {
            tracing::error!("unexpected internal failure, see the log for details");
            eprintln!("{} Unexpected internal failure", style("✗").red().bold());
            exit_codes::INTERNAL
        }
    };

    if let Some(path) = &log.path {
        println!();
        println!("Log available: {}", path.display());
    }
    std::process::exit(code);
}

fn run(cli: &Cli) -> i32 {
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("✗").red().bold(), e);
            return e.exit_code();
        }
    };

    let outcome = match &cli.update_aslain {
        Some(url_override) => commands::update::run(&config, url_override.clone()),
        None => commands::install::run(&config),
    };

    match &outcome {
        Outcome::Success { message, detail, .. } => {
            println!();
            println!("{} {}", style("✓").green().bold(), message);
            if let Some(detail) = detail {
                println!("   {detail}");
            }
        }
        Outcome::Failure { message, detail, .. } => {
            eprintln!();
            eprintln!("{} {}", style("✗").red().bold(), message);
            if let Some(detail) = detail {
                eprintln!("   {detail}");
            }
        }
    }
    outcome.exit_code()
}
