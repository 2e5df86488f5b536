use crate::config::cli::CliOpt;
use crate::util;
use anyhow::Context;
use fastrand::Rng;
use md1k_queue::{Simulation, SimulationParameters};
use std::fs;

pub fn run(options: &CliOpt) -> anyhow::Result<()> {
    let seed = if options.non_deterministic {
        Rng::new().u64(..)
    } else {
        options.seed
    };

    let params = SimulationParameters::from(options);
    let simulation = Simulation::new(&params, seed).context("invalid simulation parameters")?;
    util::print_params(seed, &simulation);

    let report = simulation.run();
    util::print_results(&report);

    if let Some(path) = &options.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to `{}`", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}
