use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("supp error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let config = supp_config::SuppConfig::load_with_dotenv().context("failed to load configuration")?;
    init_tracing(flags.quiet, flags.verbose, flags.log_json || config.audit.log_json)?;
    context::warn_unconfigured(&config);

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

/// Install the global subscriber. Audit events (target `supp_audit`) stay
/// enabled at `info` unless `SUPP_LOG` says otherwise.
fn init_tracing(quiet: bool, verbose: bool, json: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SUPP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("{level},supp_audit=info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
