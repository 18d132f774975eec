//! Contract harness: runs HTTP golden assertions against a live backend.
//!
//! # Usage
//!
//! ```bash
//! # Run every fixture
//! cargo run -p contract-harness -- --base-url http://localhost:8080
//!
//! # Run only cart fixtures, four at a time
//! cargo run -p contract-harness -- --base-url http://localhost:8080 --group cart --concurrency 4
//! ```
//!
//! Exits 0 when all assertions pass, 1 when any fail.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use contract_harness::config::HarnessConfig;
use contract_harness::fixture::{self, find_contracts_dir};
use contract_harness::reporter::Reporter;
use contract_harness::runner::Runner;
use rincon_core::config::Config;
use rincon_core::tracing::init_tracing;

#[derive(Parser)]
#[command(about = "Run HTTP contract assertions against a live backend")]
struct Args {
    /// Backend root, e.g. http://localhost:8080. Falls back to CONTRACT_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Run only fixtures in this group: auth, products, cart, orders, ...
    #[arg(long)]
    group: Option<String>,

    /// Directory containing `http/`. Falls back to CONTRACT_DIR.
    #[arg(long)]
    contracts_dir: Option<PathBuf>,

    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run(Args::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<bool> {
    let config = HarnessConfig::from_env().context("load CONTRACT_* configuration")?;
    let base_url = args
        .base_url
        .or(config.base_url)
        .context("--base-url or CONTRACT_BASE_URL is required")?;
    let contracts_dir = args
        .contracts_dir
        .or(config.dir)
        .or_else(|| find_contracts_dir(&PathBuf::from(env!("CARGO_MANIFEST_DIR"))))
        .context("no contracts/ directory found")?;

    let fixtures = fixture::load_all(&contracts_dir, args.group.as_deref())?;
    if fixtures.is_empty() {
        eprintln!("No fixtures found.");
        return Ok(true);
    }

    println!("Running {} fixture(s) against {base_url}", fixtures.len());
    println!();

    let runner = Runner::new(&base_url, Duration::from_secs(config.timeout_secs))
        .context("build HTTP client")?;
    let concurrency = args.concurrency.unwrap_or(config.concurrency);
    let mut reporter = Reporter::new();
    for (f, result) in runner.run_all(&fixtures, concurrency).await {
        println!("{}", reporter.record(f, &result));
    }

    println!();
    println!("────────────────────────────────────────────────────");
    println!("{}", reporter.summary());
    Ok(reporter.all_passed())
}
