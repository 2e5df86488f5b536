use crate::Tick;
use crate::arrival::ArrivalProcess;
use crate::params::{InvalidParameters, SimulationParameters, ValidatedParameters};
use crate::queue::{Admission, QueueModel, ServerStep};
use crate::stats::{Counters, Statistics};
use crate::theory::TheoreticalMd1;
use fastrand::Rng;
use serde::Serialize;

/// The complete state of one run
///
/// Every run starts from a fresh `Simulation`, so nothing leaks between runs
pub struct Simulation {
    params: ValidatedParameters,
    seed: u64,
    arrivals: ArrivalProcess,
    queue: QueueModel,
    next_tick: Tick,
}

/// What a single tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub tick: Tick,
    pub admission: Option<Admission>,
    pub server: ServerStep,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub params: SimulationParameters,
    pub service_time: Tick,
    pub total_ticks: Tick,
    pub counters: Counters,
    /// Packets still waiting or in service when the run ended
    pub in_system_at_end: usize,
    pub statistics: Statistics,
    pub theory: Option<TheoreticalMd1>,
}

impl Simulation {
    pub fn new(params: &SimulationParameters, seed: u64) -> Result<Self, InvalidParameters> {
        let params = params.validate()?;
        let arrivals = ArrivalProcess::new(params.params().arrival_rate, Rng::with_seed(seed));
        let queue = QueueModel::new(params.params().buffer_capacity, params.service_time());

        Ok(Self {
            params,
            seed,
            arrivals,
            queue,
            next_tick: 0,
        })
    }

    pub fn params(&self) -> &ValidatedParameters {
        &self.params
    }

    pub fn queue(&self) -> &QueueModel {
        &self.queue
    }

    pub fn is_finished(&self) -> bool {
        self.next_tick >= self.params.total_ticks()
    }

    /// Runs the next tick: arrival first, then the server
    ///
    /// Returns `None` once all ticks have been simulated
    pub fn step(&mut self) -> Option<TickOutcome> {
        if self.is_finished() {
            return None;
        }

        let t = self.next_tick;
        self.next_tick += 1;

        let admission = self
            .arrivals
            .should_generate(t)
            .then(|| self.queue.on_arrival(t));
        let server = self.queue.on_departure(t);

        Some(TickOutcome {
            tick: t,
            admission,
            server,
        })
    }

    pub fn run(mut self) -> SimulationReport {
        tracing::debug!(
            seed = self.seed,
            total_ticks = self.params.total_ticks(),
            service_time = self.params.service_time(),
            "starting simulation"
        );

        while self.step().is_some() {}

        let report = self.into_report();
        tracing::debug!(
            arrived = report.counters.packets_arrived,
            processed = report.counters.packets_processed,
            dropped = report.counters.packets_dropped,
            "simulation finished"
        );

        report
    }

    fn into_report(self) -> SimulationReport {
        let total_ticks = self.params.total_ticks();
        let in_system_at_end = self.queue.len();
        let counters = self.queue.into_counters();

        SimulationReport {
            seed: self.seed,
            service_time: self.params.service_time(),
            total_ticks,
            statistics: counters.reduce(total_ticks),
            counters,
            in_system_at_end,
            theory: TheoreticalMd1::for_params(&self.params),
            params: self.params.params().clone(),
        }
    }
}
