use clap::Parser;
use std::path::PathBuf;

/// Simulate a single-server queue with Poisson arrivals and a constant service time (M/D/1/K)
#[derive(Parser, Debug, Clone)]
#[command(name = "simulate")]
pub struct CliOpt {
    /// The simulated duration, in seconds
    #[arg(value_name = "T")]
    pub duration_secs: u64,

    /// The mean arrival rate, in packets per second
    #[arg(value_name = "LAMBDA")]
    pub arrival_rate: f64,

    /// The length of each packet, in bits
    #[arg(value_name = "L")]
    pub packet_length_bits: u64,

    /// The transmission rate of the server, in bits per second
    #[arg(value_name = "C")]
    pub transmission_rate_bps: u64,

    /// The buffer capacity, in packets (0 means unbounded)
    #[arg(value_name = "K", default_value_t = 0)]
    pub buffer_capacity: usize,

    /// The random seed used to generate arrivals
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Whether the run should be non-deterministic, i.e. using a random seed instead of `--seed`
    #[arg(long)]
    pub non_deterministic: bool,

    /// Path to a JSON file where the full report will be written
    #[arg(long)]
    pub report: Option<PathBuf>,
}
