use crate::config::cli::CliOpt;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod simulation;
mod util;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, so stdout only contains the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = CliOpt::parse();
    simulation::run(&options)?;
    Ok(())
}
