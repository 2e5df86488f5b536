use crate::Tick;
use serde::Serialize;
use std::fmt;

/// Accumulators updated while the simulation runs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Sum of the queue length sampled at the start of every tick
    pub cumulative_packets_in_queue: u64,
    pub total_sojourn_ticks: u64,
    pub idle_ticks: u64,
    pub busy_ticks: u64,
    pub packets_arrived: u64,
    pub packets_processed: u64,
    pub packets_dropped: u64,
    pub max_queue_len: usize,
}

/// The summary of a run
///
/// Ratios whose denominator is zero are `None`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub average_packets_in_queue: Option<f64>,
    /// In ticks (i.e. microseconds)
    pub average_sojourn_time: Option<f64>,
    pub idle_percentage: Option<f64>,
    pub packet_loss_percentage: Option<f64>,
}

impl Counters {
    pub fn reduce(&self, total_ticks: Tick) -> Statistics {
        Statistics {
            average_packets_in_queue: ratio(self.cumulative_packets_in_queue, total_ticks),
            average_sojourn_time: ratio(self.total_sojourn_ticks, self.packets_processed),
            idle_percentage: ratio(self.idle_ticks, total_ticks).map(|r| r * 100.0),
            packet_loss_percentage: ratio(
                self.packets_dropped,
                self.packets_dropped + self.packets_processed,
            )
            .map(|r| r * 100.0),
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Formats an optional statistic, printing `undefined` when it has no value
///
/// The formatter's precision is forwarded, so `{:.2}` applies to the value
pub struct OrUndefined(pub Option<f64>);

impl fmt::Display for OrUndefined {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.0, f.precision()) {
            (Some(value), Some(precision)) => write!(f, "{value:.precision$}"),
            (Some(value), None) => write!(f, "{value}"),
            (None, _) => f.write_str("undefined"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reduce() {
        let counters = Counters {
            cumulative_packets_in_queue: 500,
            total_sojourn_ticks: 900,
            idle_ticks: 250,
            busy_ticks: 750,
            packets_arrived: 4,
            packets_processed: 3,
            packets_dropped: 1,
            max_queue_len: 2,
        };

        let stats = counters.reduce(1000);
        assert_eq!(stats.average_packets_in_queue, Some(0.5));
        assert_eq!(stats.average_sojourn_time, Some(300.0));
        assert_eq!(stats.idle_percentage, Some(25.0));
        assert_eq!(stats.packet_loss_percentage, Some(25.0));
    }

    #[test]
    fn test_reduce_without_packets_is_undefined() {
        let counters = Counters {
            idle_ticks: 10,
            ..Counters::default()
        };

        let stats = counters.reduce(10);
        assert_eq!(stats.average_packets_in_queue, Some(0.0));
        assert_eq!(stats.average_sojourn_time, None);
        assert_eq!(stats.idle_percentage, Some(100.0));
        assert_eq!(stats.packet_loss_percentage, None);

        let stats = counters.reduce(0);
        assert_eq!(stats.average_packets_in_queue, None);
        assert_eq!(stats.idle_percentage, None);
    }

    #[test]
    fn test_undefined_display() {
        assert_eq!(format!("{:.2}", OrUndefined(Some(1.23456))), "1.23");
        assert_eq!(format!("{:.4}", OrUndefined(Some(0.5))), "0.5000");
        assert_eq!(format!("{}", OrUndefined(Some(0.5))), "0.5");
        assert_eq!(format!("{:.2}", OrUndefined(None)), "undefined");
    }
}
