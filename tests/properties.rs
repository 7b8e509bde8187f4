/*!
 * Invariant Properties
 * Randomized workloads checked against the engine's core invariants
 */

use proptest::prelude::*;
use sched_sim::{ProcessState, Scheduler, SchedulingPolicy};

fn any_policy() -> impl Strategy<Value = SchedulingPolicy> {
    prop_oneof![
        Just(SchedulingPolicy::Fcfs),
        Just(SchedulingPolicy::Sjf),
        Just(SchedulingPolicy::Priority),
        Just(SchedulingPolicy::RoundRobin),
    ]
}

// (priority, burst, arrival)
fn any_workload() -> impl Strategy<Value = Vec<(u8, u32, u64)>> {
    prop::collection::vec((0u8..10, 0u32..8, 0u64..10), 1..12)
}

proptest! {
    #[test]
    fn prop_time_advances_and_one_process_runs(
        policy in any_policy(),
        workload in any_workload(),
        steps in 1usize..120,
    ) {
        let engine = Scheduler::new(policy);
        for (i, &(priority, burst, arrival)) in workload.iter().enumerate() {
            engine.create_process(format!("p{}", i), priority, burst, arrival).unwrap();
        }

        for n in 1..=steps {
            engine.step();
            let snap = engine.snapshot();
            prop_assert_eq!(snap.system_time, n as u64);
            prop_assert!(snap.statistics.running <= 1);
            for p in &snap.processes {
                prop_assert!(p.remaining_time <= p.burst_time);
            }
        }
    }

    #[test]
    fn prop_terminated_metrics_hold(
        policy in any_policy(),
        workload in any_workload(),
    ) {
        let engine = Scheduler::new(policy);
        for (i, &(priority, burst, arrival)) in workload.iter().enumerate() {
            engine.create_process(format!("p{}", i), priority, burst, arrival).unwrap();
        }

        // enough ticks for every arrival plus every burst unit
        for _ in 0..150 {
            engine.step();
        }
        prop_assert!(engine.all_terminated());

        for p in &engine.snapshot().processes {
            prop_assert_eq!(p.state, ProcessState::Terminated);
            prop_assert_eq!(p.remaining_time, 0);
            prop_assert_eq!(p.turnaround_time, p.completion_time - p.arrival_time);
            prop_assert_eq!(
                p.waiting_time,
                p.turnaround_time - u64::from(p.burst_time)
            );
        }
    }

    #[test]
    fn prop_reset_restores_initial_state(
        policy in any_policy(),
        workload in any_workload(),
        steps in 0usize..60,
    ) {
        let engine = Scheduler::new(policy);
        for (i, &(priority, burst, arrival)) in workload.iter().enumerate() {
            engine.create_process(format!("p{}", i), priority, burst, arrival).unwrap();
        }
        for _ in 0..steps {
            engine.step();
        }

        engine.reset();
        let snap = engine.snapshot();
        prop_assert_eq!(snap.system_time, 0);
        prop_assert!(snap.processes.is_empty());
        prop_assert!(snap.ready_queue.is_empty());
        prop_assert!(snap.running.is_none());
        prop_assert_eq!(snap.policy, policy);
    }
}
