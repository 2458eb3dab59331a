//! FlowSync admin command-line client

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod context;
mod output;

use cli::{Cli, Commands};
use context::{Context, Reported};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        // Notifications already told the user what went wrong.
        if err.downcast_ref::<Reported>().is_none() {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "flowsync=error",
        1 => "flowsync=debug",
        _ => "flowsync=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new(&cli)?;
    tracing::debug!(api_url = ctx.api_url(), "context ready");

    match cli.command {
        Commands::Projects(cmd) => commands::projects::execute(&ctx, cmd).await,
        Commands::Organizations(cmd) => commands::organizations::execute(&ctx, cmd).await,
        Commands::Members(cmd) => commands::members::execute(&ctx, cmd).await,
        Commands::Notices(cmd) => commands::notices::execute(&ctx, cmd).await,
        Commands::Links(cmd) => commands::links::execute(&ctx, cmd).await,
    }
}
