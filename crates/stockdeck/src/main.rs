mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stockdeck_core::ProductStore;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a store
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "stockdeck", &mut std::io::stdout());
            Ok(())
        }

        // Everything else operates on the store
        cmd => {
            let store = build_store(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &store, &cli.global).await
        }
    }
}

/// Build a `ProductStore` from the config file with CLI flag overrides.
fn build_store(global: &cli::GlobalOpts) -> Result<ProductStore, CliError> {
    let cfg = stockdeck_config::load_config_or_default();
    let mut catalog = stockdeck_config::to_catalog_config(&cfg)?;

    if let Some(ref base_url) = global.base_url {
        catalog.base_url = base_url.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {base_url}"),
        })?;
    }
    if let Some(limit) = global.limit {
        catalog.page_limit = limit;
    }
    if let Some(ref path) = global.snapshot_path {
        catalog.snapshot_path = path.clone();
    }

    Ok(ProductStore::new(catalog)?)
}
