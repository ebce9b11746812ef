//! switch-metros: reassign the metro of every shopper listed in a CSV file

use anyhow::Result;
use clap::Parser;
use migrator_cli::{logging, runner, RunConfig, SwitchMetrosArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args = SwitchMetrosArgs::parse();
    logging::init_logging()?;

    let config = RunConfig::try_from(args)?;
    runner::run(config).await?;
    Ok(())
}
