/*!
 * Allocation Policies
 * Adaptive, round-robin, priority and first-come-first-serve strategies
 */

use super::traits::{AllocationOutcome, Allocator};
use super::types::{AllocationPolicy, WaitAccounting};
use crate::process::Process;
use crate::resources::ResourceLedger;
use std::cmp::Reverse;

/// Priority desc, then wait time desc, then packing weight asc
#[derive(Debug, Clone, Copy, Default)]
pub struct Adaptive;

impl Allocator for Adaptive {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn order(&self, candidates: &mut [&mut Process]) {
        candidates.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.wait_time.cmp(&a.wait_time))
                .then_with(|| a.need.weight().total_cmp(&b.need.weight()))
        });
    }
}

/// Registry order, at most one grant per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl Allocator for RoundRobin {
    fn name(&self) -> &'static str {
        "roundrobin"
    }

    fn order(&self, _candidates: &mut [&mut Process]) {}

    fn grant_limit(&self) -> Option<usize> {
        Some(1)
    }
}

/// Priority desc; stable, so ties keep registry order
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityFirst;

impl Allocator for PriorityFirst {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn order(&self, candidates: &mut [&mut Process]) {
        candidates.sort_by_key(|p| Reverse(p.priority));
    }
}

/// Arrival time asc, nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Allocator for Fcfs {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn order(&self, candidates: &mut [&mut Process]) {
        candidates.sort_by_key(|p| p.arrival_time);
    }
}

impl Allocator for AllocationPolicy {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn order(&self, candidates: &mut [&mut Process]) {
        match self {
            Self::Adaptive => Adaptive.order(candidates),
            Self::RoundRobin => RoundRobin.order(candidates),
            Self::Priority => PriorityFirst.order(candidates),
            Self::Fcfs => Fcfs.order(candidates),
        }
    }

    fn grant_limit(&self) -> Option<usize> {
        match self {
            Self::Adaptive => Adaptive.grant_limit(),
            Self::RoundRobin => RoundRobin.grant_limit(),
            Self::Priority => PriorityFirst.grant_limit(),
            Self::Fcfs => Fcfs.grant_limit(),
        }
    }
}

/// Run one allocation pass of `policy` over the waiting processes
pub fn allocate(
    policy: AllocationPolicy,
    waiting: Vec<&mut Process>,
    ledger: &mut ResourceLedger,
    accounting: WaitAccounting,
) -> AllocationOutcome {
    policy.apply(waiting, ledger, accounting)
}
