/*!
 * Sched-Sim Library
 * Single-core CPU scheduler simulator: synthetic processes, discrete
 * ticks, four dispatch policies, and per-process completion metrics
 */

pub mod broadcast;
pub mod core;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::broadcast::SnapshotBroadcaster;
pub use crate::core::{Pid, Priority, SchedulerError, SchedulerResult, Tick};
pub use crate::process::{ProcessRecord, ProcessState, ReadyQueue};
pub use crate::scheduler::{
    DriverConfig, Request, Scheduler, SchedulerConfig, SchedulingPolicy, SimulationDriver,
    Snapshot,
};
