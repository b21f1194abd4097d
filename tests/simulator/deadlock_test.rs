/*!
 * Deadlock Tests
 * Starvation flagging and forced termination through the simulator
 */

use pretty_assertions::assert_eq;
use resource_sim::{
    AllocationPolicy, ProcessSpec, ProcessStatus, ProcessType, Simulator, SimulatorBuilder,
    WaitAccounting,
};

fn starved_builder() -> SimulatorBuilder {
    Simulator::builder()
        .with_capacity(1, 100, 1)
        .with_policy(AllocationPolicy::Priority)
        .with_initial_processes(0)
        .with_seed(5)
}

fn oversized(priority: u8) -> ProcessSpec {
    ProcessSpec::random()
        .with_type(ProcessType::Balanced)
        .with_priority(priority)
        .with_need(2, 50, 1)
        .with_burst(3)
}

#[test]
fn test_oversized_process_waits_until_threshold() {
    let mut sim = starved_builder().build().unwrap();
    let id = sim.add_process(oversized(3));

    for _ in 0..10 {
        sim.tick();
    }
    assert_eq!(sim.process(id).unwrap().status, ProcessStatus::Waiting);
    assert_eq!(sim.process(id).unwrap().wait_time, 10);
    assert_eq!(sim.counters().deadlocks, 0);
    assert!(sim.last_deadlock_report().starving.is_empty());
}

#[test]
fn test_monitor_terminates_lowest_priority_victim() {
    let mut sim = starved_builder().build().unwrap();
    let low = sim.add_process(oversized(3));
    let high = sim.add_process(oversized(6));

    for _ in 0..11 {
        sim.tick();
    }

    let report = sim.last_deadlock_report();
    assert!(report.deadlock);
    assert_eq!(report.victim, Some(low));
    assert_eq!(report.starving, vec![low, high]);
    assert_eq!(sim.counters().deadlocks, 1);

    let victim = sim.process(low).unwrap();
    assert_eq!(victim.status, ProcessStatus::Terminated);
    assert_eq!(victim.completion_time, Some(11));
    assert_eq!(sim.process(high).unwrap().status, ProcessStatus::Waiting);

    let snapshot = sim.snapshot();
    assert!(snapshot.deadlock_warning);
    assert_eq!(snapshot.starving, vec![low, high]);
}

#[test]
fn test_second_victim_on_following_tick() {
    let mut sim = starved_builder().build().unwrap();
    sim.add_process(oversized(3));
    let high = sim.add_process(oversized(6));

    for _ in 0..12 {
        sim.tick();
    }

    assert_eq!(sim.counters().deadlocks, 2);
    assert_eq!(sim.last_deadlock_report().victim, Some(high));
    assert!(sim.is_finished());

    // nothing left waiting, so the warning clears
    sim.tick();
    assert!(!sim.last_deadlock_report().deadlock);
    assert_eq!(sim.counters().deadlocks, 2);
}

#[test]
fn test_victim_ties_go_to_first_in_registry() {
    let mut sim = starved_builder().build().unwrap();
    let first = sim.add_process(oversized(4));
    sim.add_process(oversized(4));

    for _ in 0..11 {
        sim.tick();
    }
    assert_eq!(sim.last_deadlock_report().victim, Some(first));
}

#[test]
fn test_starvation_while_running_is_not_deadlock() {
    let mut sim = starved_builder().build().unwrap();
    let holder = sim.add_process(
        ProcessSpec::random()
            .with_type(ProcessType::Balanced)
            .with_priority(9)
            .with_need(1, 50, 1)
            .with_burst(30),
    );
    let starving = sim.add_process(
        ProcessSpec::random()
            .with_type(ProcessType::Balanced)
            .with_priority(2)
            .with_need(1, 50, 1)
            .with_burst(3),
    );

    for _ in 0..15 {
        sim.tick();
    }

    let report = sim.last_deadlock_report();
    assert_eq!(report.starving, vec![starving]);
    assert!(!report.deadlock);
    assert_eq!(report.victim, None);
    assert_eq!(sim.counters().deadlocks, 0);
    assert_eq!(sim.process(holder).unwrap().status, ProcessStatus::Running);
    assert_eq!(sim.process(starving).unwrap().status, ProcessStatus::Waiting);
}

#[test]
fn test_detection_disabled_never_terminates() {
    let mut sim = starved_builder()
        .with_deadlock_detection(false)
        .build()
        .unwrap();
    let id = sim.add_process(oversized(3));

    for _ in 0..50 {
        sim.tick();
    }

    assert_eq!(sim.process(id).unwrap().status, ProcessStatus::Waiting);
    assert_eq!(sim.process(id).unwrap().wait_time, 50);
    assert_eq!(sim.counters().deadlocks, 0);
    assert!(!sim.snapshot().deadlock_warning);
    assert!(!sim.is_finished());
}

#[test]
fn test_custom_threshold() {
    let mut sim = starved_builder().with_deadlock_threshold(3).build().unwrap();
    let id = sim.add_process(oversized(3));

    for _ in 0..3 {
        sim.tick();
    }
    assert_eq!(sim.process(id).unwrap().status, ProcessStatus::Waiting);

    sim.tick();
    assert_eq!(sim.process(id).unwrap().status, ProcessStatus::Terminated);
    assert_eq!(sim.counters().deadlocks, 1);
}

#[test]
fn test_double_accounting_reaches_threshold_sooner() {
    let mut sim = starved_builder()
        .with_wait_accounting(WaitAccounting::Double)
        .build()
        .unwrap();
    let id = sim.add_process(oversized(3));

    sim.tick();
    assert_eq!(sim.process(id).unwrap().wait_time, 2);

    for _ in 0..4 {
        sim.tick();
    }
    assert_eq!(sim.process(id).unwrap().status, ProcessStatus::Waiting);

    // monitor sees 11 during tick 6
    sim.tick();
    assert_eq!(sim.process(id).unwrap().status, ProcessStatus::Terminated);
    assert_eq!(sim.process(id).unwrap().completion_time, Some(6));
}
