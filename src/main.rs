use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use registration_wizard::bootstrap::{
    build_settings, resolve_config, tracing::init_tracing_subscriber, wire_dependencies,
};
use registration_wizard::console::{run_console, ConsoleEventPort, ConsoleLayout};
use rw_app::WizardOrchestrator;
use tokio::io::BufReader;
use tracing::{error, info};

/// Event registration wizard.
#[derive(Parser, Debug)]
#[command(name = "registration-wizard")]
#[command(about = "Register attendees for the Bounty Strategic Suppliers Showcase", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "RW_CONFIG")]
    config: Option<PathBuf>,

    /// Console layout, overrides general.layout
    #[arg(short, long, value_enum)]
    layout: Option<ConsoleLayout>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = resolve_config(args.config)?;
    init_tracing_subscriber(&config.log_dir)?;

    let layout = match args.layout {
        Some(layout) => layout,
        None => config
            .layout
            .parse::<ConsoleLayout>()
            .map_err(anyhow::Error::msg)
            .context("invalid general.layout")?,
    };
    info!(?layout, version = env!("CARGO_PKG_VERSION"), "starting registration wizard");

    let console = Arc::new(ConsoleEventPort::new(
        Arc::from(layout.renderer()),
        std::io::stdout(),
    ));
    let deps = wire_dependencies(&config, console.clone()).inspect_err(|err| {
        error!(error = %err, "failed to wire dependencies");
    })?;
    let wizard = Arc::new(WizardOrchestrator::new(deps, build_settings(&config)));

    console.print(registration_wizard::console::command::HELP_TEXT);
    run_console(wizard, console, BufReader::new(tokio::io::stdin())).await?;

    info!("registration wizard stopped");
    Ok(())
}
