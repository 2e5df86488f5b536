use crate::Tick;
use crate::stats::Counters;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet {
    pub arrival_tick: Tick,
}

/// What the server did during a single tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerStep {
    /// Nothing to transmit
    Idle,
    /// The head of the queue started its transmission
    StartingService,
    /// The head of the queue is still being transmitted
    Servicing,
    /// The head of the queue finished its transmission and left the system
    Completing { sojourn_ticks: Tick },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Enqueued,
    Dropped,
}

/// A FIFO buffer drained by a single server with a constant service time
///
/// The packet being serviced stays at the head of the buffer until it departs, so it counts
/// towards the buffer's capacity.
pub struct QueueModel {
    packets: VecDeque<Packet>,
    capacity: usize,
    service_time: Tick,
    service_start: Option<Tick>,
    counters: Counters,
}

impl QueueModel {
    /// A `capacity` of zero means the buffer is unbounded
    pub fn new(capacity: usize, service_time: Tick) -> Self {
        Self {
            packets: VecDeque::new(),
            capacity,
            service_time,
            service_start: None,
            counters: Counters::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn into_counters(self) -> Counters {
        self.counters
    }

    /// Handles a packet arriving at tick `t`, dropping it if the buffer is full
    pub fn on_arrival(&mut self, t: Tick) -> Admission {
        self.counters.packets_arrived += 1;

        if self.capacity != 0 && self.packets.len() >= self.capacity {
            self.counters.packets_dropped += 1;
            tracing::trace!(tick = t, queue_len = self.packets.len(), "packet dropped");
            return Admission::Dropped;
        }

        self.packets.push_back(Packet { arrival_tick: t });
        self.counters.max_queue_len = self.counters.max_queue_len.max(self.packets.len());
        Admission::Enqueued
    }

    /// Advances the server by one tick
    pub fn on_departure(&mut self, t: Tick) -> ServerStep {
        // Sampled before any state change, so it is the queue length at the start of the tick
        self.counters.cumulative_packets_in_queue += self.packets.len() as u64;

        let Some(head) = self.packets.front() else {
            self.counters.idle_ticks += 1;
            return ServerStep::Idle;
        };
        self.counters.busy_ticks += 1;

        let Some(service_start) = self.service_start else {
            self.service_start = Some(t);
            return ServerStep::StartingService;
        };

        if t < service_start.saturating_add(self.service_time) {
            return ServerStep::Servicing;
        }

        let sojourn_ticks = t - head.arrival_tick;
        self.packets.pop_front();
        self.service_start = None;
        self.counters.total_sojourn_ticks += sojourn_ticks;
        self.counters.packets_processed += 1;

        ServerStep::Completing { sojourn_ticks }
    }
}
