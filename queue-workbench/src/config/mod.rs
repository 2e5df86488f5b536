use crate::config::cli::CliOpt;
use md1k_queue::SimulationParameters;

pub mod cli;

impl From<&CliOpt> for SimulationParameters {
    fn from(opt: &CliOpt) -> Self {
        SimulationParameters {
            arrival_rate: opt.arrival_rate,
            packet_length_bits: opt.packet_length_bits,
            transmission_rate_bps: opt.transmission_rate_bps,
            buffer_capacity: opt.buffer_capacity,
            duration_secs: opt.duration_secs,
        }
    }
}
