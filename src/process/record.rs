/*!
 * Process Record
 * Passive per-process data: identity, execution profile, live counters,
 * lifecycle state, and the metrics derived at termination
 */

use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};

/// Process lifecycle state
///
/// `Waiting` is reserved for blocked processes; no current policy reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created but not yet arrived
    New,
    /// Arrived and queued for dispatch
    Ready,
    /// Executing this tick
    Running,
    /// Blocked (reserved, unreached)
    Waiting,
    /// Finished all execution
    Terminated,
}

/// One synthetic process in the simulation
///
/// `waiting_time`, `turnaround_time`, and `completion_time` are only
/// meaningful once `state` is `Terminated`; they are fixed at that point
/// and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRecord {
    pub pid: Pid,
    pub name: String,
    pub priority: Priority,
    /// Total execution units required (constant)
    pub burst_time: u32,
    /// Execution units still owed; never negative
    pub remaining_time: u32,
    /// Tick at which the process becomes eligible to run
    pub arrival_time: Tick,
    pub waiting_time: u64,
    pub turnaround_time: u64,
    pub completion_time: Tick,
    pub state: ProcessState,
    /// Remaining quantum; round-robin only, reset on every dispatch
    pub time_slice: u32,
}

impl ProcessRecord {
    pub fn new(
        pid: Pid,
        name: impl Into<String>,
        priority: Priority,
        burst_time: u32,
        arrival_time: Tick,
        quantum: u32,
    ) -> Self {
        Self {
            pid,
            name: name.into(),
            priority,
            burst_time,
            remaining_time: burst_time,
            arrival_time,
            waiting_time: 0,
            turnaround_time: 0,
            completion_time: 0,
            state: ProcessState::New,
            time_slice: quantum,
        }
    }

    /// Execute one time unit. A zero-burst process stays at zero and is
    /// picked up by the termination check on its first running tick.
    pub fn run_one_unit(&mut self) {
        self.remaining_time = self.remaining_time.saturating_sub(1);
    }

    /// Mark terminated at `now` and derive the final metrics.
    ///
    /// turnaround = completion - arrival, waiting = turnaround - burst.
    pub fn terminate(&mut self, now: Tick) {
        self.state = ProcessState::Terminated;
        self.completion_time = now;
        self.turnaround_time = now - self.arrival_time;
        self.waiting_time = self.turnaround_time - u64::from(self.burst_time);
    }

    /// Enter the running slot with a fresh quantum.
    pub fn dispatch(&mut self, quantum: u32) {
        self.state = ProcessState::Running;
        self.time_slice = quantum;
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }
}
