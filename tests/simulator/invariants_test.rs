/*!
 * Invariant Tests
 * Property-based checks over random workloads and operation sequences
 */

use proptest::prelude::*;
use resource_sim::{
    AllocationPolicy, ProcessSpec, ProcessStatus, ResourceVector, Simulator, WaitAccounting,
};

#[derive(Debug, Clone)]
enum Op {
    Tick,
    AddRandom,
    AddCustom,
    AddExplicit { priority: u8, cpu: u32, memory: u32, io: u32, burst: u64 },
    Terminate(u32),
    SwitchPolicy(AllocationPolicy),
}

fn policy_strategy() -> impl Strategy<Value = AllocationPolicy> {
    prop::sample::select(AllocationPolicy::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Tick),
        2 => Just(Op::AddRandom),
        1 => Just(Op::AddCustom),
        1 => (0u8..=12, 1u32..=10, 50u32..=2500, 1u32..=12, 0u64..=10).prop_map(
            |(priority, cpu, memory, io, burst)| Op::AddExplicit { priority, cpu, memory, io, burst }
        ),
        1 => (1u32..=40).prop_map(Op::Terminate),
        1 => policy_strategy().prop_map(Op::SwitchPolicy),
    ]
}

fn build(
    cpu: u32,
    memory: u32,
    io: u32,
    policy: AllocationPolicy,
    accounting: WaitAccounting,
    seed: u64,
) -> Simulator {
    Simulator::builder()
        .with_capacity(cpu, memory, io)
        .with_policy(policy)
        .with_wait_accounting(accounting)
        .with_initial_processes(5)
        .with_seed(seed)
        .build()
        .unwrap()
}

fn check_state(sim: &Simulator) -> Result<(), TestCaseError> {
    let ledger = sim.ledger();
    let capacity = ledger.capacity();
    prop_assert!(ledger.allocated().fits_within(&capacity));

    let mut held = ResourceVector::ZERO;
    for process in sim.processes() {
        match process.status {
            ProcessStatus::Running => {
                prop_assert_eq!(process.allocated, process.need);
                prop_assert!(process.remaining_time > 0);
                held.cpu += process.allocated.cpu;
                held.memory += process.allocated.memory;
                held.io += process.allocated.io;
            }
            _ => {
                prop_assert!(process.allocated.is_zero(), "{:?}", process);
            }
        }

        prop_assert!(process.remaining_time <= process.burst_time);
        prop_assert!((1..=10).contains(&process.priority));
        prop_assert!(process.arrival_time <= sim.time());
        prop_assert_eq!(process.status.is_terminal(), process.completion_time.is_some());
        if let Some(done) = process.completion_time {
            prop_assert!(done >= process.arrival_time);
        }
        if process.status == ProcessStatus::Completed {
            prop_assert_eq!(process.remaining_time, 0);
        }
    }
    prop_assert_eq!(held, ledger.allocated());

    let counts = sim.status_counts();
    prop_assert_eq!(counts.total(), sim.processes().len());

    let metrics = sim.metrics();
    for utilization in [
        metrics.cpu_utilization,
        metrics.memory_utilization,
        metrics.io_utilization,
    ] {
        prop_assert!((0.0..=100.0).contains(&utilization));
    }
    prop_assert!(sim.snapshot().history.len() <= 20);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_invariants_hold_under_random_operations(
        cpu in 1u32..=8,
        memory in 100u32..=2000,
        io in 1u32..=10,
        policy in policy_strategy(),
        double in any::<bool>(),
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..150),
    ) {
        let accounting = if double { WaitAccounting::Double } else { WaitAccounting::Single };
        let mut sim = build(cpu, memory, io, policy, accounting, seed);
        check_state(&sim)?;

        for op in ops {
            match op {
                Op::Tick => {
                    let before = sim.counters();
                    let time = sim.time();
                    sim.tick();
                    prop_assert_eq!(sim.time(), time + 1);

                    let after = sim.counters();
                    prop_assert!(after.deadlocks - before.deadlocks <= 1);
                    if sim.policy() == AllocationPolicy::RoundRobin {
                        prop_assert!(after.context_switches - before.context_switches <= 1);
                    }
                }
                Op::AddRandom => {
                    let id = sim.add_random_process();
                    prop_assert_eq!(id as usize, sim.processes().len());
                }
                Op::AddCustom => {
                    sim.add_process(ProcessSpec::custom());
                }
                Op::AddExplicit { priority, cpu, memory, io, burst } => {
                    let id = sim.add_process(
                        ProcessSpec::random()
                            .with_priority(priority)
                            .with_need(cpu, memory, io)
                            .with_burst(burst),
                    );
                    let process = sim.process(id).unwrap();
                    prop_assert_eq!(process.need, ResourceVector::new(cpu, memory, io));
                    prop_assert!(process.burst_time >= 1);
                }
                Op::Terminate(id) => {
                    let was_live = sim
                        .process(id)
                        .map(|p| !p.status.is_terminal())
                        .unwrap_or(false);
                    prop_assert_eq!(sim.terminate(id), was_live);
                    if was_live {
                        prop_assert_eq!(sim.process(id).unwrap().status, ProcessStatus::Terminated);
                    }
                }
                Op::SwitchPolicy(next) => sim.set_policy(next),
            }
            check_state(&sim)?;
        }
    }

    #[test]
    fn test_random_processes_fit_capacity(
        cpu in 1u32..=8,
        memory in 100u32..=2000,
        io in 1u32..=10,
        seed in any::<u64>(),
    ) {
        let mut sim = build(cpu, memory, io, AllocationPolicy::Adaptive, WaitAccounting::Single, seed);
        for _ in 0..20 {
            sim.add_random_process();
            sim.add_process(ProcessSpec::custom());
        }
        let capacity = ResourceVector::new(cpu, memory, io);
        for process in sim.processes() {
            prop_assert!(process.need.fits_within(&capacity), "{:?}", process.need);
        }
    }

    #[test]
    fn test_fitting_workload_eventually_finishes(
        seed in any::<u64>(),
        policy in policy_strategy(),
    ) {
        let mut sim = Simulator::builder()
            .with_policy(policy)
            .with_initial_processes(10)
            .with_seed(seed)
            .build()
            .unwrap();

        // every random need fits, so each process runs within a bounded number of ticks
        for _ in 0..500 {
            if sim.is_finished() {
                break;
            }
            sim.tick();
        }
        prop_assert!(sim.is_finished());
        prop_assert_eq!(sim.ledger().allocated(), ResourceVector::ZERO);
    }
}
