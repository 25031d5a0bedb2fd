//! CLI command definitions and handlers.

pub mod check;

use clap::{Parser, Subcommand};

/// Passport QA - Passport photo compliance checker
#[derive(Parser)]
#[command(name = "passport-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate photos against passport requirements
    Check(check::CheckArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every photo is compliant (or there was nothing to check).
    Success,
    /// At least one photo failed a rule.
    NonCompliant,
    /// The run could not complete.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::NonCompliant => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
