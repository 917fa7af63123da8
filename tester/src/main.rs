//! Harness command-line entry point

use anyhow::Result;
use clap::Parser;

use shared::logging::{init_tracing_with_level, log_error};
use shared::{ComponentId, HarnessConfig};
use tester::{Args, run};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.apply_to(HarnessConfig::from_env()?)?;

    init_tracing_with_level(Some(&config.log_level));
    tracing::debug!("Configuration: {:?}", config);

    if let Err(e) = run(args.command, &config).await {
        log_error(ComponentId::Tester, "Command", &e);
        return Err(e);
    }
    Ok(())
}
