/*!
 * Scheduling Policies
 * The four interchangeable dispatch policies and their wire names
 */

use crate::core::errors::SchedulerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dispatch policy selecting what runs each tick
///
/// All variants share the same tick skeleton; they differ only in the
/// dispatch selection rule and, for round-robin, the quantum preemption
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// First-come-first-served: dequeue the head, run to completion
    Fcfs,
    /// Shortest job first (non-preemptive): minimum remaining time wins
    Sjf,
    /// Static priority (non-preemptive): highest priority value wins
    Priority,
    /// Round-robin: FIFO with quantum-exhaustion preemption
    RoundRobin,
}

impl SchedulingPolicy {
    /// Wire name used by operator and transport requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Priority",
            Self::RoundRobin => "RR",
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    /// Malformed names are rejected outright; a misspelled policy must
    /// never fall back to a default mid-run.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FCFS" => Ok(Self::Fcfs),
            "SJF" => Ok(Self::Sjf),
            "Priority" => Ok(Self::Priority),
            "RR" => Ok(Self::RoundRobin),
            other => Err(SchedulerError::InvalidPolicy(other.to_string())),
        }
    }
}
