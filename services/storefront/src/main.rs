use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;

use rincon_core::config::Config;
use rincon_core::tracing::init_tracing;
use rincon_storefront::cli::{self, Cli};
use rincon_storefront::config::StorefrontConfig;
use rincon_storefront::error::StorefrontError;
use rincon_storefront::infra::http::RestBackend;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Cli::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<(), StorefrontError> {
    let config = StorefrontConfig::from_env()
        .context("load RINCON_* configuration")?
        .with_base_url(args.base_url);
    tracing::debug!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "config loaded"
    );

    let backend = RestBackend::from_config(&config)?;
    cli::run(args.command, &backend).await
}
