/*!
 * Scenario Tests
 * Tick-by-tick walkthrough of a two-process run under the priority policy
 */

use pretty_assertions::assert_eq;
use resource_sim::{
    AllocationPolicy, ProcessSpec, ProcessStatus, ProcessType, ResourceVector, Simulator,
};

fn two_process_run() -> (Simulator, u32, u32) {
    let mut sim = Simulator::builder()
        .with_capacity(1, 100, 1)
        .with_policy(AllocationPolicy::Priority)
        .with_initial_processes(0)
        .with_seed(1)
        .build()
        .unwrap();

    let a = sim.add_process(
        ProcessSpec::random()
            .with_name("A")
            .with_type(ProcessType::Balanced)
            .with_priority(5)
            .with_need(1, 50, 1)
            .with_burst(5),
    );
    let b = sim.add_process(
        ProcessSpec::random()
            .with_name("B")
            .with_type(ProcessType::Balanced)
            .with_priority(8)
            .with_need(1, 60, 1)
            .with_burst(3),
    );
    (sim, a, b)
}

#[test]
fn test_tick_one_grants_higher_priority() {
    let (mut sim, a, b) = two_process_run();
    sim.tick();

    let b_proc = sim.process(b).unwrap();
    assert_eq!(b_proc.status, ProcessStatus::Running);
    assert_eq!(b_proc.allocated, ResourceVector::new(1, 60, 1));

    let a_proc = sim.process(a).unwrap();
    assert_eq!(a_proc.status, ProcessStatus::Waiting);
    assert_eq!(a_proc.wait_time, 1);
    assert!(a_proc.allocated.is_zero());

    assert_eq!(sim.ledger().allocated(), ResourceVector::new(1, 60, 1));
    assert_eq!(sim.counters().context_switches, 1);
}

#[test]
fn test_b_completes_at_tick_three() {
    let (mut sim, a, b) = two_process_run();
    for _ in 0..3 {
        sim.tick();
    }

    let b_proc = sim.process(b).unwrap();
    assert_eq!(b_proc.status, ProcessStatus::Completed);
    assert_eq!(b_proc.completion_time, Some(3));
    assert_eq!(b_proc.turnaround(), Some(3));
    assert_eq!(sim.ledger().allocated(), ResourceVector::ZERO);
    assert_eq!(sim.process(a).unwrap().status, ProcessStatus::Waiting);
}

#[test]
fn test_a_granted_at_tick_four() {
    let (mut sim, a, _) = two_process_run();
    for _ in 0..4 {
        sim.tick();
    }

    let a_proc = sim.process(a).unwrap();
    assert_eq!(a_proc.status, ProcessStatus::Running);
    assert_eq!(a_proc.allocated, ResourceVector::new(1, 50, 1));
    assert_eq!(a_proc.wait_time, 3);
    assert_eq!(sim.counters().context_switches, 2);
}

#[test]
fn test_final_snapshot() {
    let (mut sim, a, b) = two_process_run();
    for _ in 0..8 {
        sim.tick();
    }

    let snapshot = sim.snapshot();
    assert!(snapshot.finished);
    assert_eq!(snapshot.time, 8);

    let a_proc = snapshot.process(a).unwrap();
    assert_eq!(a_proc.status, ProcessStatus::Completed);
    assert_eq!(a_proc.completion_time, Some(8));
    assert_eq!(a_proc.turnaround(), Some(8));
    assert_eq!(snapshot.process(b).unwrap().status, ProcessStatus::Completed);

    assert_eq!(snapshot.counters.context_switches, 2);
    assert_eq!(snapshot.counters.deadlocks, 0);
    assert!(!snapshot.deadlock_warning);

    assert_eq!(snapshot.resources.cpu.allocated, 0);
    assert_eq!(snapshot.resources.memory.allocated, 0);
    assert_eq!(snapshot.resources.io.allocated, 0);

    assert_eq!(snapshot.status_counts.completed, 2);
    assert_eq!(snapshot.metrics.throughput, 15.0);
    assert_eq!(snapshot.metrics.avg_turnaround_time, 5.5);
    assert_eq!(snapshot.metrics.avg_wait_time, 1.5);
    assert_eq!(snapshot.history.len(), 8);
}

#[test]
fn test_a_does_not_finish_early() {
    let (mut sim, a, _) = two_process_run();
    for _ in 0..7 {
        sim.tick();
    }
    let a_proc = sim.process(a).unwrap();
    assert_eq!(a_proc.status, ProcessStatus::Running);
    assert_eq!(a_proc.remaining_time, 1);
    assert!(!sim.is_finished());
}

#[test]
fn test_snapshot_serializes_to_json() {
    let (mut sim, _, _) = two_process_run();
    sim.tick();

    let json = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(json["policy"], "priority");
    assert_eq!(json["processes"][1]["status"], "running");
    assert_eq!(json["processes"][1]["type"], "balanced");
    assert_eq!(json["processes"][0]["turnaround"], serde_json::Value::Null);
    assert_eq!(json["counters"]["context_switches"], 1);
}
