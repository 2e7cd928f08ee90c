//! SpeedPanel CLI - Command-line interface
//!
//! Runs speed tests through the SpeedPanel library, either on an interactive
//! dashboard or headless, and manages preferences and configuration.

mod commands;
mod error;
mod runner;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};

use commands::common::{Switch, ThemeArg};
use commands::config::ConfigCommands;
use commands::run::RunArgs;
use commands::settings::SettingsArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "speedpanel")]
#[command(version = speedpanel::VERSION)]
#[command(about = "Run an internet speed test and show the results you care about", long_about = None)]
struct Cli {
    /// Mirror log output to stderr (headless commands only)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard,

    /// Run a single speed test and print the results
    Run {
        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Seconds to wait before showing results (overrides speedtest.result_delay)
        #[arg(long, value_name = "SECS")]
        delay: Option<u64>,
    },

    /// View or change display preferences
    Settings {
        /// Presentation theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,

        /// Show the download speed
        #[arg(long, value_enum)]
        download: Option<Switch>,

        /// Show the upload speed
        #[arg(long, value_enum)]
        upload: Option<Switch>,
    },

    /// View or modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => commands::dashboard::run(cli.verbose),
        Commands::Run { json, delay } => commands::run::run(RunArgs {
            json,
            delay,
            verbose: cli.verbose,
        }),
        Commands::Settings {
            theme,
            download,
            upload,
        } => commands::settings::run(SettingsArgs {
            theme,
            download,
            upload,
        }),
        Commands::Config { command } => commands::config::run(command),
        Commands::Init { force } => commands::init::run(force),
    }
}
