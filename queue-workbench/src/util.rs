use md1k_queue::stats::OrUndefined;
use md1k_queue::{Simulation, SimulationReport};

pub fn print_params(seed: u64, simulation: &Simulation) {
    let validated = simulation.params();
    let params = validated.params();

    println!("--- Params ---");
    println!("* Seed: {seed}");
    println!("* Duration: {} s", params.duration_secs);
    println!("* Arrival rate: {} packets/s", params.arrival_rate);
    println!("* Packet length: {} bits", params.packet_length_bits);
    println!("* Transmission rate: {} bps", params.transmission_rate_bps);
    if validated.is_unbounded() {
        println!("* Buffer capacity: unbounded");
    } else {
        println!("* Buffer capacity: {} packets", params.buffer_capacity);
    }
    println!("* Service time: {} us", validated.service_time());
    println!("* Utilization: {:.4}", validated.utilization());
}

pub fn print_results(report: &SimulationReport) {
    let stats = &report.statistics;
    let counters = &report.counters;

    println!("--- Results ---");
    println!("* Service time: {} us", report.service_time);
    println!(
        "* Average packets in queue: {:.4}",
        OrUndefined(stats.average_packets_in_queue)
    );
    println!(
        "* Average sojourn time: {:.2} us",
        OrUndefined(stats.average_sojourn_time)
    );
    println!("* Server idle: {:.2}%", OrUndefined(stats.idle_percentage));
    println!(
        "* Packet loss: {:.2}%",
        OrUndefined(stats.packet_loss_percentage)
    );

    println!("--- Packets ---");
    println!("* Arrived: {}", counters.packets_arrived);
    println!("* Processed: {}", counters.packets_processed);
    println!("* Dropped: {}", counters.packets_dropped);
    println!("* Still in system: {}", report.in_system_at_end);
    println!("* Max queue length: {}", counters.max_queue_len);

    if let Some(theory) = &report.theory {
        println!("--- M/D/1 theory ---");
        println!(
            "* Mean packets in system: {:.4}",
            theory.mean_packets_in_system
        );
        println!(
            "* Mean sojourn time: {:.2} us ({:.6} s)",
            theory.mean_sojourn_time,
            theory.mean_sojourn_secs()
        );
    }
}
