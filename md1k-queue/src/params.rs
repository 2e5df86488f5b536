use crate::{MICROSECONDS, Tick};
use serde::Serialize;
use thiserror::Error;

/// The inputs of a single simulation run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationParameters {
    /// The mean arrival rate, in packets per second
    pub arrival_rate: f64,
    /// The length of every packet, in bits
    pub packet_length_bits: u64,
    /// The rate at which the server transmits, in bits per second
    pub transmission_rate_bps: u64,
    /// The maximum number of packets in the system, including the one being serviced (0 means
    /// the buffer is unbounded)
    pub buffer_capacity: usize,
    /// The simulated duration, in seconds
    pub duration_secs: u64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidParameters {
    #[error("the arrival rate must be a positive finite number (got `{arrival_rate}`)")]
    ArrivalRate { arrival_rate: f64 },
    #[error("the packet length must be greater than zero bits")]
    PacketLength,
    #[error("the transmission rate must be greater than zero bits per second")]
    TransmissionRate,
    #[error("the simulation duration must be at least one second")]
    Duration,
    #[error(
        "a packet of {packet_length_bits} bits is transmitted in less than half a microsecond at {transmission_rate_bps} bps, which the simulation cannot represent"
    )]
    ServiceTimeTooShort {
        packet_length_bits: u64,
        transmission_rate_bps: u64,
    },
    #[error(
        "a packet of {packet_length_bits} bits takes longer to transmit at {transmission_rate_bps} bps than the tick counter can represent"
    )]
    ServiceTimeTooLong {
        packet_length_bits: u64,
        transmission_rate_bps: u64,
    },
    #[error("a duration of {duration_secs} seconds does not fit in the tick counter")]
    TooManyTicks { duration_secs: u64 },
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<ValidatedParameters, InvalidParameters> {
        if !self.arrival_rate.is_finite() || self.arrival_rate <= 0.0 {
            return Err(InvalidParameters::ArrivalRate {
                arrival_rate: self.arrival_rate,
            });
        }

        if self.packet_length_bits == 0 {
            return Err(InvalidParameters::PacketLength);
        }

        if self.transmission_rate_bps == 0 {
            return Err(InvalidParameters::TransmissionRate);
        }

        if self.duration_secs == 0 {
            return Err(InvalidParameters::Duration);
        }

        let total_ticks = self
            .duration_secs
            .checked_mul(MICROSECONDS)
            .ok_or(InvalidParameters::TooManyTicks {
                duration_secs: self.duration_secs,
            })?;

        let service_time = (self.packet_length_bits as f64 / self.transmission_rate_bps as f64
            * MICROSECONDS as f64)
            .round();
        if service_time < 1.0 {
            return Err(InvalidParameters::ServiceTimeTooShort {
                packet_length_bits: self.packet_length_bits,
                transmission_rate_bps: self.transmission_rate_bps,
            });
        }

        // `Tick::MAX as f64` rounds up to 2^64, so anything at or above it would saturate
        if service_time >= Tick::MAX as f64 {
            return Err(InvalidParameters::ServiceTimeTooLong {
                packet_length_bits: self.packet_length_bits,
                transmission_rate_bps: self.transmission_rate_bps,
            });
        }

        Ok(ValidatedParameters {
            params: self.clone(),
            service_time: service_time as Tick,
            total_ticks,
        })
    }
}

/// Parameters that passed validation, together with the constants derived from them
#[derive(Clone, Debug)]
pub struct ValidatedParameters {
    params: SimulationParameters,
    service_time: Tick,
    total_ticks: Tick,
}

impl ValidatedParameters {
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// The time it takes to transmit a single packet, in ticks
    pub fn service_time(&self) -> Tick {
        self.service_time
    }

    /// The number of ticks the simulation runs for
    pub fn total_ticks(&self) -> Tick {
        self.total_ticks
    }

    /// The offered load, i.e. the mean number of arrivals during one service time
    pub fn utilization(&self) -> f64 {
        self.params.arrival_rate * self.service_time as f64 / MICROSECONDS as f64
    }

    pub fn is_unbounded(&self) -> bool {
        self.params.buffer_capacity == 0
    }
}
