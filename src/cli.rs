//! CLI definitions using clap derive API
//!
//! The command surface is flat: running without arguments installs the
//! configuration, `--update-aslain` switches to the self-update workflow.

use clap::builder::{Styles, styling::AnsiColor};
use clap::Parser;
use std::path::PathBuf;

/// roboaslain - Aslain's Modpack configuration installer
#[derive(Parser, Debug)]
#[command(
    name = "roboaslain",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Finds your Aslain's WoT Modpack installation and installs your modpack configuration",
    long_about = "roboaslain locates the Aslain's Modpack directory (known locations, then a \
                  bounded disk scan, then a manual prompt), downloads your configuration, backs \
                  up the previous one, installs the new one, and launches the modpack installer \
                  with it preloaded.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  roboaslain                                \x1b[90m# Install your configuration\x1b[0m\n   \
                  roboaslain --update-aslain                \x1b[90m# Open the modpack download page\x1b[0m\n   \
                  roboaslain --update-aslain https://...exe \x1b[90m# Update the installer from a direct link\x1b[0m\n   \
                  roboaslain --verbose                      \x1b[90m# Show debug output\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Download and install the latest Aslain's modpack installer, optionally
    /// from a direct URL
    #[arg(long = "update-aslain", short = 'u', value_name = "URL")]
    pub update_aslain: Option<Option<String>>,

    /// Search configuration file (YAML)
    #[arg(long, value_name = "FILE", env = "ROBOASLAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
