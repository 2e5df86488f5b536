use crate::{MICROSECONDS, Tick};
use fastrand::Rng;

/// Poisson arrivals, expressed as exponentially distributed gaps between consecutive packets
pub struct ArrivalProcess {
    arrival_rate: f64,
    next_arrival_tick: Tick,
    rng: Rng,
}

impl ArrivalProcess {
    /// Creates the arrival process and schedules the first arrival
    ///
    /// The rng is owned for the whole run, so successive gaps are drawn from a single stream
    pub fn new(arrival_rate: f64, rng: Rng) -> Self {
        let mut arrivals = Self {
            arrival_rate,
            next_arrival_tick: 0,
            rng,
        };
        arrivals.next_arrival_tick = arrivals.next_gap();
        arrivals
    }

    pub fn next_arrival_tick(&self) -> Tick {
        self.next_arrival_tick
    }

    /// Returns whether a packet arrives at tick `t`, scheduling the next arrival if so
    pub fn should_generate(&mut self, t: Tick) -> bool {
        if t < self.next_arrival_tick {
            return false;
        }

        let gap = self.next_gap();
        self.next_arrival_tick = self.next_arrival_tick.saturating_add(gap);
        true
    }

    /// Draws an inter-arrival time, in seconds
    pub fn inter_arrival_sample(&mut self) -> f64 {
        exponential_sample(self.rng.f64(), self.arrival_rate)
    }

    fn next_gap(&mut self) -> Tick {
        // `as` saturates for values beyond `u64::MAX`
        (self.inter_arrival_sample() * MICROSECONDS as f64).round() as Tick
    }
}

/// Inverse-CDF transform of a uniform sample in `[0, 1)` into an exponential variate
fn exponential_sample(uniform: f64, rate: f64) -> f64 {
    // ln(1 - u) is infinite for u == 1
    let u = uniform.clamp(0.0, 1.0 - f64::EPSILON);
    -(-u).ln_1p() / rate
}
