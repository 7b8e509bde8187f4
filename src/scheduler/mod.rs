/*!
 * Scheduler Engine
 * Owns simulated time, the process table, the ready queue, the running
 * slot, and the active policy; executes the tick state machine
 *
 * Every mutation and query runs under one exclusive lock scoped to the
 * engine instance, so partial updates are never observable. Lock hold time
 * is bounded by one tick's bookkeeping; no operation holds it across I/O.
 */

use crate::broadcast::SnapshotBroadcaster;
use crate::core::limits::{DEFAULT_QUANTUM, MAX_PROCESSES, QUEUE_CAPACITY};
use crate::core::types::{Pid, Tick};
use crate::process::{ProcessRecord, ReadyQueue};
use log::{info, warn};
use parking_lot::Mutex;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

mod driver;
mod operations;
mod policy;
mod request;
mod snapshot;
mod tick;

pub use driver::{DriverConfig, SimulationDriver};
pub use policy::SchedulingPolicy;
pub use request::Request;
pub use snapshot::{QueuedProcess, RunningProcess, Snapshot, StateCounts};

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SchedulerConfig {
    pub policy: SchedulingPolicy,
    pub quantum: u32,
    pub max_processes: usize,
    pub queue_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::Fcfs,
            quantum: DEFAULT_QUANTUM,
            max_processes: MAX_PROCESSES,
            queue_capacity: QUEUE_CAPACITY,
        }
    }
}

/// Scheduler state guarded by the engine lock
pub(super) struct Inner {
    pub(super) table: Vec<ProcessRecord>,
    pub(super) queue: ReadyQueue,
    pub(super) running: Option<Pid>,
    pub(super) system_time: Tick,
    pub(super) policy: SchedulingPolicy,
    pub(super) quantum: u32,
    pub(super) max_processes: usize,
}

impl Inner {
    /// Pids are sequential from 1 and the table is never compacted mid-run,
    /// so pid - 1 indexes the table directly.
    pub(super) fn record(&self, pid: Pid) -> &ProcessRecord {
        &self.table[(pid - 1) as usize]
    }

    pub(super) fn record_mut(&mut self, pid: Pid) -> &mut ProcessRecord {
        &mut self.table[(pid - 1) as usize]
    }
}

/// Single-core CPU scheduler engine
pub struct Scheduler {
    inner: Arc<Mutex<Inner>>,
    auto_run: Arc<AtomicBool>,
    broadcaster: Option<SnapshotBroadcaster>,
}

impl Scheduler {
    /// Create an engine with the given policy and default limits.
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self::with_config(SchedulerConfig {
            policy,
            ..SchedulerConfig::default()
        })
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        // the queue holds distinct pids, so a capacity of at least
        // max_processes guarantees an admitted process is never dropped
        let queue_capacity = config.queue_capacity.max(config.max_processes);
        if queue_capacity != config.queue_capacity {
            warn!(
                "queue_capacity {} below max_processes {}, raising to {}",
                config.queue_capacity, config.max_processes, queue_capacity
            );
        }
        info!(
            "scheduler initialized: policy={}, quantum={}, max_processes={}",
            config.policy, config.quantum, config.max_processes
        );
        Self {
            inner: Arc::new(Mutex::new(Inner {
                table: Vec::with_capacity(config.max_processes),
                queue: ReadyQueue::new(queue_capacity),
                running: None,
                system_time: 0,
                policy: config.policy,
                quantum: config.quantum,
                max_processes: config.max_processes,
            })),
            auto_run: Arc::new(AtomicBool::new(false)),
            broadcaster: None,
        }
    }

    /// Attach a broadcast sink; a fresh snapshot is published after every
    /// successful mutation and every tick.
    pub fn with_broadcaster(mut self, broadcaster: SnapshotBroadcaster) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    pub fn broadcaster(&self) -> Option<&SnapshotBroadcaster> {
        self.broadcaster.as_ref()
    }

    pub(super) fn lock(&self) -> parking_lot::MutexGuard<'_, Inner> {
        self.inner.lock()
    }

    /// Publish the given snapshot to the attached sink, if any.
    pub(super) fn publish(&self, snapshot: Snapshot) {
        if let Some(ref broadcaster) = self.broadcaster {
            broadcaster.publish(snapshot);
        }
    }

    pub(super) fn auto_run_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.auto_run)
    }
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            auto_run: Arc::clone(&self.auto_run),
            broadcaster: self.broadcaster.clone(),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulingPolicy::Fcfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessState;

    #[test]
    fn test_new_engine_is_empty() {
        let engine = Scheduler::new(SchedulingPolicy::Fcfs);
        let snap = engine.snapshot();
        assert_eq!(snap.system_time, 0);
        assert!(snap.processes.is_empty());
        assert!(snap.ready_queue.is_empty());
        assert!(snap.running.is_none());
        assert_eq!(snap.quantum, DEFAULT_QUANTUM);
    }

    #[test]
    fn test_sequential_pids() {
        let engine = Scheduler::default();
        assert_eq!(engine.create_process("a", 1, 3, 0).unwrap(), 1);
        assert_eq!(engine.create_process("b", 1, 3, 0).unwrap(), 2);
        assert_eq!(engine.create_process("c", 1, 3, 0).unwrap(), 3);
    }

    #[test]
    fn test_clone_shares_state() {
        let engine = Scheduler::default();
        let other = engine.clone();
        engine.create_process("a", 1, 3, 0).unwrap();
        assert_eq!(other.snapshot().processes.len(), 1);
    }

    #[test]
    fn test_undersized_queue_capacity_is_raised() {
        let engine = Scheduler::with_config(SchedulerConfig {
            max_processes: 4,
            queue_capacity: 1,
            ..SchedulerConfig::default()
        });
        for name in ["a", "b", "c", "d"] {
            engine.create_process(name, 1, 1, 0).unwrap();
        }
        // with the raised capacity no admitted process is ever dropped,
        // so the workload still drains to completion
        for _ in 0..12 {
            engine.step();
        }
        assert!(engine.all_terminated());
    }

    #[test]
    fn test_step_admits_and_dispatches() {
        let engine = Scheduler::new(SchedulingPolicy::Fcfs);
        engine.create_process("a", 5, 4, 0).unwrap();
        engine.step();
        let snap = engine.snapshot();
        assert_eq!(snap.system_time, 1);
        let running = snap.running.expect("process should be dispatched");
        assert_eq!(running.pid, 1);
        assert_eq!(snap.processes[0].state, ProcessState::Running);
    }
}
