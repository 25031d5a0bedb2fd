//! Passport QA CLI - checks photos against passport compliance rules.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check::CheckArgs, Cli, Commands, ExitCode};
use config::AppConfig;

/// Log level for the number of `-v` flags.
const fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(log_level(verbose)))
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = if let Some(Commands::Check(args)) = cli.command {
        args
    } else if cli.check.paths.is_empty() {
        eprintln!("error: No paths specified. Use --help for usage information.");
        return ExitCode::Error.into();
    } else {
        cli.check
    };

    let args = CheckArgs::with_config(args, &AppConfig::load());
    commands::check::run(&args)
        .map(|summary| summary.exit_code)
        .unwrap_or_else(|e| {
            eprintln!("error: {e:#}");
            ExitCode::Error
        })
        .into()
}
