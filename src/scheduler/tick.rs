/*!
 * Tick State Machine
 * One simulated time unit: execute, terminate, preempt, admit, dispatch
 *
 * All four policies share this skeleton; they differ only in the dispatch
 * selection rule and, for round-robin, the quantum-exhaustion check.
 */

use super::policy::SchedulingPolicy;
use super::{Inner, Scheduler};
use crate::process::ProcessState;
use log::{debug, info};
use std::cmp::Reverse;

impl Scheduler {
    /// Execute exactly one tick under the active policy, then advance
    /// system time by 1. An empty ready queue is the normal idle case,
    /// not an error.
    pub fn step(&self) {
        let mut inner = self.lock();
        debug!("tick: system_time={}", inner.system_time);

        run_current(&mut inner);
        admit_arrivals(&mut inner);
        dispatch(&mut inner);
        inner.system_time += 1;

        let snapshot = inner.snapshot();
        drop(inner);
        self.publish(snapshot);
    }
}

/// Steps 1-3: account one execution unit for the running process, then
/// check termination and, under round-robin, quantum exhaustion.
fn run_current(inner: &mut Inner) {
    let Some(pid) = inner.running else {
        return;
    };

    let now = inner.system_time;
    let policy = inner.policy;
    let quantum = inner.quantum;

    let process = inner.record_mut(pid);
    process.run_one_unit();
    if policy == SchedulingPolicy::RoundRobin {
        process.time_slice = process.time_slice.saturating_sub(1);
    }

    if process.remaining_time == 0 {
        process.terminate(now);
        info!(
            "process {:?} (pid {}) terminated: completion={}, turnaround={}, waiting={}",
            process.name, pid, process.completion_time, process.turnaround_time,
            process.waiting_time
        );
        inner.running = None;
    } else if policy == SchedulingPolicy::RoundRobin && process.time_slice == 0 {
        process.state = ProcessState::Ready;
        process.time_slice = quantum;
        info!("process pid {} preempted: quantum exhausted, re-enqueued", pid);
        inner.queue.enqueue(pid);
        inner.running = None;
    }
}

/// Step 4: every NEW process whose arrival tick equals the current system
/// time becomes READY and joins the queue tail in table order.
fn admit_arrivals(inner: &mut Inner) {
    let now = inner.system_time;
    let arrived: Vec<_> = inner
        .table
        .iter()
        .filter(|p| p.state == ProcessState::New && p.arrival_time == now)
        .map(|p| p.pid)
        .collect();

    for pid in arrived {
        inner.record_mut(pid).state = ProcessState::Ready;
        info!("process pid {} arrived at tick {}", pid, now);
        inner.queue.enqueue(pid);
    }
}

/// Step 5: if the running slot is free, pick the next process per the
/// active policy's selection rule. Ties break toward the earliest queue
/// position.
fn dispatch(inner: &mut Inner) {
    if inner.running.is_some() || inner.queue.is_empty() {
        return;
    }

    let policy = inner.policy;
    let Inner { queue, table, .. } = inner;
    match policy {
        // plain FIFO head
        SchedulingPolicy::Fcfs | SchedulingPolicy::RoundRobin => {}
        SchedulingPolicy::Sjf => {
            queue.promote_to_front(|pid| table[(pid - 1) as usize].remaining_time);
        }
        SchedulingPolicy::Priority => {
            queue.promote_to_front(|pid| Reverse(table[(pid - 1) as usize].priority));
        }
    }

    if let Some(pid) = inner.queue.dequeue() {
        let quantum = inner.quantum;
        let process = inner.record_mut(pid);
        process.dispatch(quantum);
        info!(
            "dispatched process {:?} (pid {}): remaining={}, policy={}",
            process.name, pid, process.remaining_time, policy
        );
        inner.running = Some(pid);
    }
}
