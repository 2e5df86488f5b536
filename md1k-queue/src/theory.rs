//! Closed-form M/D/1 results (Pollaczek-Khinchine), used as a reference for simulated runs

use crate::MICROSECONDS;
use crate::params::ValidatedParameters;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TheoreticalMd1 {
    pub utilization: f64,
    pub mean_packets_in_system: f64,
    /// In ticks (i.e. microseconds)
    pub mean_sojourn_time: f64,
}

impl TheoreticalMd1 {
    /// Only defined for an unbounded buffer and a utilization below one
    pub fn for_params(params: &ValidatedParameters) -> Option<Self> {
        let rho = params.utilization();
        if !params.is_unbounded() || rho >= 1.0 {
            return None;
        }

        let service_time = params.service_time() as f64;
        let queueing = rho / (2.0 * (1.0 - rho));
        Some(Self {
            utilization: rho,
            mean_packets_in_system: rho + rho * queueing,
            mean_sojourn_time: service_time + service_time * queueing,
        })
    }

    pub fn mean_sojourn_secs(&self) -> f64 {
        self.mean_sojourn_time / MICROSECONDS as f64
    }
}
