pub mod arrival;
pub mod params;
pub mod queue;
pub mod simulation;
pub mod stats;
pub mod theory;

pub use params::{InvalidParameters, SimulationParameters};
pub use simulation::{Simulation, SimulationReport};

/// A point in simulated time, in microseconds since the start of the run
pub type Tick = u64;

/// Ticks per simulated second
pub const MICROSECONDS: u64 = 1_000_000;

#[cfg(test)]
mod test {
    use super::*;
    use crate::queue::{Admission, ServerStep};
    use bon::builder;

    #[builder]
    fn params(
        #[builder(default = 10)] duration_secs: u64,
        #[builder(default = 5.0)] arrival_rate: f64,
        #[builder(default = 10)] packet_length_bits: u64,
        #[builder(default = 50)] transmission_rate_bps: u64,
        #[builder(default = 0)] buffer_capacity: usize,
    ) -> SimulationParameters {
        SimulationParameters {
            arrival_rate,
            packet_length_bits,
            transmission_rate_bps,
            buffer_capacity,
            duration_secs,
        }
    }

    fn run(params: &SimulationParameters, seed: u64) -> SimulationReport {
        Simulation::new(params, seed).unwrap().run()
    }

    fn assert_conservation(report: &SimulationReport) {
        let c = &report.counters;
        assert_eq!(
            c.packets_processed + c.packets_dropped + report.in_system_at_end as u64,
            c.packets_arrived
        );
        assert_eq!(c.idle_ticks + c.busy_ticks, report.total_ticks);
    }

    #[test]
    fn test_saturated_unbounded_scenario() {
        let report = run(&params().call(), 42);

        assert_eq!(report.service_time, 200_000);
        assert_eq!(report.total_ticks, 10_000_000);
        assert_eq!(report.counters.packets_dropped, 0);
        // Every service takes 200_000 ticks plus one tick to start, so at most 49 fit in 10s
        assert!(report.counters.packets_processed < 50);
        assert!(report.theory.is_none());
        assert_conservation(&report);
    }

    #[test]
    fn test_overloaded_bounded_scenario() {
        let report = run(&params().arrival_rate(50.0).buffer_capacity(5).call(), 42);

        assert!(report.counters.packets_dropped > 0);
        assert!(report.statistics.packet_loss_percentage.unwrap() > 0.0);
        assert!(report.counters.max_queue_len <= 5);
        assert_conservation(&report);
    }

    #[test]
    fn test_unbounded_never_drops() {
        for seed in 0..5 {
            let report = run(&params().arrival_rate(20.0).duration_secs(5).call(), seed);
            assert_eq!(report.counters.packets_dropped, 0);
            assert_eq!(report.statistics.packet_loss_percentage, Some(0.0));
            assert_conservation(&report);
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let params = params().arrival_rate(7.0).buffer_capacity(3).call();
        let first = run(&params, 1234);
        let second = run(&params, 1234);

        assert_eq!(first.counters, second.counters);
        assert_eq!(first.statistics, second.statistics);
        assert_eq!(first.in_system_at_end, second.in_system_at_end);
    }

    #[test]
    fn test_capacity_one_drops_while_busy() {
        let params = params().arrival_rate(20.0).buffer_capacity(1).call();
        let mut simulation = Simulation::new(&params, 9).unwrap();

        while let Some(outcome) = simulation.step() {
            if let Some(admission) = outcome.admission {
                // The queue length after the server step can only be 0 or 1
                assert!(simulation.queue().len() <= 1);
                // Admission implies the server was idle, so it picks the packet up right away
                if admission == Admission::Enqueued {
                    assert_eq!(outcome.server, ServerStep::StartingService);
                }
            }
        }

        let report = run(&params, 9);
        assert!(report.counters.packets_dropped > 0);
        assert_eq!(report.counters.max_queue_len, 1);
        assert_conservation(&report);
    }

    #[test]
    fn test_stable_queue_approaches_theory() {
        // Service time of 1ms and utilization of 0.5
        let params = params()
            .arrival_rate(500.0)
            .packet_length_bits(1)
            .transmission_rate_bps(1_000)
            .duration_secs(50)
            .call();
        let report = run(&params, 42);
        let theory = report.theory.clone().unwrap();

        let occupancy = report.statistics.average_packets_in_queue.unwrap();
        assert!(occupancy >= 0.0);
        assert!(
            (occupancy - theory.mean_packets_in_system).abs() < 0.1,
            "simulated {occupancy}, expected {}",
            theory.mean_packets_in_system
        );

        let idle = report.statistics.idle_percentage.unwrap();
        assert!((idle - 50.0).abs() < 5.0, "idle was {idle}%");
    }

    #[test]
    fn test_no_arrivals_reports_undefined_sojourn() {
        // A mean gap of 10^6 seconds makes an arrival within one second astronomically unlikely
        let params = params().arrival_rate(1e-6).duration_secs(1).call();
        let report = run(&params, 42);

        assert_eq!(report.counters.packets_arrived, 0);
        assert_eq!(report.statistics.average_sojourn_time, None);
        assert_eq!(report.statistics.packet_loss_percentage, None);
        assert_eq!(report.statistics.idle_percentage, Some(100.0));
        assert_eq!(report.statistics.average_packets_in_queue, Some(0.0));
    }

    #[test]
    fn test_service_longer_than_run_processes_nothing() {
        // 10^19 ticks of service, close to the limit of the tick counter
        let params = params()
            .packet_length_bits(10_000_000_000_000)
            .transmission_rate_bps(1)
            .duration_secs(2)
            .call();
        let report = run(&params, 42);

        assert_eq!(report.service_time, 10_000_000_000_000_000_000);
        assert!(report.counters.packets_arrived > 0);
        assert_eq!(report.counters.packets_processed, 0);
        assert_eq!(report.statistics.average_sojourn_time, None);
        assert_conservation(&report);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let result = Simulation::new(&params().transmission_rate_bps(0).call(), 42);
        assert!(matches!(result, Err(InvalidParameters::TransmissionRate)));
    }

    #[test]
    fn test_step_stops_after_last_tick() {
        let params = params().duration_secs(1).call();
        let mut simulation = Simulation::new(&params, 42).unwrap();

        let mut ticks = 0;
        let mut last = None;
        while let Some(outcome) = simulation.step() {
            assert_eq!(outcome.tick, ticks);
            ticks += 1;
            last = Some(outcome.tick);
        }

        assert_eq!(ticks, MICROSECONDS);
        assert_eq!(last, Some(MICROSECONDS - 1));
        assert!(simulation.is_finished());
        assert_eq!(simulation.step(), None);
    }
}
