use clap::Parser;

pub mod global;
pub mod record_args;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use record_args::RecordArgs;
pub use root_commands::Commands;

/// Top-level CLI parser for the `supp` binary.
#[derive(Debug, Parser)]
#[command(name = "supp", version, about = "Suppression records with change auditing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, audit events still emitted)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            log_json: self.log_json,
        }
    }
}
