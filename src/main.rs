use std::env;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use spotter::cli::args::{Cli, Commands};
use spotter::cli::commands;
use spotter::config::{ColorSetting, Config};

const LOG_ENV: &str = "SPOTTER_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(config: &Config, tui: bool) {
    let filter = if tui {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(&config.logging.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_color(setting: ColorSetting) {
    match setting {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {
            if env::var_os("NO_COLOR").is_some() {
                colored::control::set_override(false);
            }
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    init_color(config.general.color);
    init_logging(&config, matches!(cli.command, Commands::Tui));

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Plan(args) => commands::plan(&config, args.command, format)?,
        Commands::Start { split } => commands::start(&config, split, format)?,
        Commands::Status { watch } => commands::status(&config, watch, format)?,
        Commands::Set(args) => commands::set(&config, args.command, format)?,
        Commands::Next => commands::next(&config, format)?,
        Commands::Prev => commands::prev(&config, format)?,
        Commands::Pause => commands::pause(&config, format)?,
        Commands::Resume => commands::resume(&config, format)?,
        Commands::Finish { notes } => commands::finish(notes, format)?,
        Commands::Cancel { force } => commands::cancel(force, format)?,
        Commands::History { limit, id } => commands::history(&config, limit, id, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        Commands::Tui => {
            spotter::tui::run(commands::open_tracker()?, &config)?;
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
