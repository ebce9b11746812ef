//! assign-vehicles: assign one vehicle to every driver listed in a CSV file

use anyhow::Result;
use clap::Parser;
use migrator_cli::{logging, runner, AssignVehiclesArgs, RunConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = AssignVehiclesArgs::parse();
    logging::init_logging()?;

    let config = RunConfig::try_from(args)?;
    runner::run(config).await?;
    Ok(())
}
