/*!
 * Sched-Sim - Main Entry Point
 *
 * Demo wiring for the scheduler engine:
 * - seeds the four classic demo processes
 * - streams every snapshot to stdout as JSON (stand-in for a transport)
 * - drives the simulation to completion at a configurable cadence
 */

use sched_sim::{
    DriverConfig, Scheduler, SchedulingPolicy, SimulationDriver, SnapshotBroadcaster,
};
use std::error::Error;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let policy = match std::env::var("SCHEDSIM_POLICY") {
        Ok(name) => name.parse()?,
        Err(_) => SchedulingPolicy::Fcfs,
    };
    let cadence_ms = std::env::var("SCHEDSIM_CADENCE_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200);

    let broadcaster = SnapshotBroadcaster::new();
    let engine = Scheduler::new(policy).with_broadcaster(broadcaster.clone());

    // stand-in transport: print every published snapshot
    let mut rx = broadcaster.subscribe();
    let sink = tokio::spawn(async move {
        while let Ok(snapshot) = rx.recv().await {
            match snapshot.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("snapshot serialization failed: {}", e),
            }
        }
    });

    engine.create_process("A", 5, 8, 0)?;
    engine.create_process("B", 3, 4, 1)?;
    engine.create_process("C", 7, 6, 2)?;
    engine.create_process("D", 2, 2, 3)?;

    let driver = SimulationDriver::spawn(
        engine.clone(),
        DriverConfig {
            cadence: Duration::from_millis(cadence_ms),
        },
    )?;
    driver.join().await;

    println!("--- final metrics (policy {}) ---", engine.policy());
    for p in engine.snapshot().processes {
        println!(
            "{:<8} pid={} completion={} turnaround={} waiting={}",
            p.name, p.pid, p.completion_time, p.turnaround_time, p.waiting_time
        );
    }

    sink.abort();
    Ok(())
}
