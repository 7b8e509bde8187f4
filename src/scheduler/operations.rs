/*!
 * Engine Mutation Operations
 * Create, reconfigure, reset, and query under the engine lock
 *
 * Every operation validates before writing any field, so a rejected
 * request leaves the engine untouched and no rollback is ever needed.
 */

use super::policy::SchedulingPolicy;
use super::Scheduler;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Pid, Priority, Tick};
use crate::process::ProcessRecord;
use log::info;

impl Scheduler {
    /// Append a new process with the next sequential id, state NEW.
    ///
    /// The process becomes READY on the tick its arrival time equals the
    /// system time; an arrival tick already in the past is never admitted.
    pub fn create_process(
        &self,
        name: impl Into<String>,
        priority: Priority,
        burst_time: u32,
        arrival_time: Tick,
    ) -> SchedulerResult<Pid> {
        let mut inner = self.lock();
        if inner.table.len() >= inner.max_processes {
            return Err(SchedulerError::TableFull {
                capacity: inner.max_processes,
            });
        }

        let pid = inner.table.len() as Pid + 1;
        let quantum = inner.quantum;
        let record = ProcessRecord::new(pid, name, priority, burst_time, arrival_time, quantum);
        info!(
            "created process {:?} (pid {}): priority={}, burst={}, arrival={}",
            record.name, pid, record.priority, record.burst_time, record.arrival_time
        );
        inner.table.push(record);

        let snapshot = inner.snapshot();
        drop(inner);
        self.publish(snapshot);
        Ok(pid)
    }

    /// Swap the active policy atomically. Queue order and the running
    /// process are untouched; the change takes effect from the next tick.
    pub fn set_policy(&self, policy: SchedulingPolicy) {
        let mut inner = self.lock();
        if inner.policy == policy {
            return;
        }
        info!("policy changed: {} -> {}", inner.policy, policy);
        inner.policy = policy;

        let snapshot = inner.snapshot();
        drop(inner);
        self.publish(snapshot);
    }

    /// Validate and apply a policy by its wire name.
    pub fn set_policy_name(&self, name: &str) -> SchedulerResult<()> {
        let policy: SchedulingPolicy = name.parse()?;
        self.set_policy(policy);
        Ok(())
    }

    /// Set the round-robin quantum. Values outside `1..=u32::MAX` are
    /// rejected and the prior quantum is retained.
    pub fn set_quantum(&self, quantum: i64) -> SchedulerResult<()> {
        let value = u32::try_from(quantum).map_err(|_| SchedulerError::InvalidQuantum(quantum))?;
        if value == 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        let mut inner = self.lock();
        inner.quantum = value;
        info!("quantum set to {}", inner.quantum);

        let snapshot = inner.snapshot();
        drop(inner);
        self.publish(snapshot);
        Ok(())
    }

    /// Clear all state back to the initial empty configuration. The
    /// configured policy and quantum survive the reset.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.table.clear();
        inner.queue.clear();
        inner.running = None;
        inner.system_time = 0;
        info!("simulation reset (policy {} retained)", inner.policy);

        let snapshot = inner.snapshot();
        drop(inner);
        self.publish(snapshot);
    }

    /// Current simulated time.
    pub fn system_time(&self) -> Tick {
        self.lock().system_time
    }

    /// Active dispatch policy.
    pub fn policy(&self) -> SchedulingPolicy {
        self.lock().policy
    }

    /// Configured round-robin quantum.
    pub fn quantum(&self) -> u32 {
        self.lock().quantum
    }

    /// Pid of the process occupying the running slot, if any.
    pub fn running(&self) -> Option<Pid> {
        self.lock().running
    }

    /// Number of processes in the table (any state).
    pub fn process_count(&self) -> usize {
        self.lock().table.len()
    }

    /// True when at least one process exists and all are terminated;
    /// the auto-run driver's stop condition.
    pub fn all_terminated(&self) -> bool {
        let inner = self.lock();
        !inner.table.is_empty() && inner.table.iter().all(|p| p.is_terminated())
    }
}
