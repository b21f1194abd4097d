/*!
 * Allocation Traits
 * The single capability every allocation strategy implements
 */

use super::types::WaitAccounting;
use crate::core::types::ProcessId;
use crate::process::{Process, ProcessStatus};
use crate::resources::ResourceLedger;
use tracing::debug;

/// Result of one allocation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// Processes moved to running, in grant order
    pub granted: Vec<ProcessId>,
    /// Processes still waiting after the pass
    pub still_waiting: Vec<ProcessId>,
}

impl AllocationOutcome {
    /// One context switch per grant
    #[inline]
    pub fn context_switches(&self) -> u64 {
        self.granted.len() as u64
    }
}

/// An allocation strategy
///
/// Strategies only decide the order in which waiting processes are offered
/// resources and how many grants a pass may make; the grant loop itself is
/// shared so every strategy reads the ledger the same way.
pub trait Allocator {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Reorder candidates in place; they arrive in registry order
    fn order(&self, candidates: &mut [&mut Process]);

    /// Maximum grants per pass, `None` for unbounded
    fn grant_limit(&self) -> Option<usize> {
        None
    }

    /// Offer resources to the waiting candidates
    ///
    /// Grants never revoke anything: only waiting processes are candidates.
    fn apply(
        &self,
        mut candidates: Vec<&mut Process>,
        ledger: &mut ResourceLedger,
        accounting: WaitAccounting,
    ) -> AllocationOutcome {
        self.order(&mut candidates);
        grant_in_order(self.name(), candidates, ledger, self.grant_limit(), accounting)
    }
}

/// Walk candidates in order, granting whatever fits
///
/// Availability is re-read after every grant. Once `limit` grants have been
/// made the walk stops; candidates after that point were never offered.
/// Under `Single` accounting every candidate left waiting is charged one
/// wait tick; under `Double` only the candidates offered and refused are.
fn grant_in_order(
    policy: &'static str,
    candidates: Vec<&mut Process>,
    ledger: &mut ResourceLedger,
    limit: Option<usize>,
    accounting: WaitAccounting,
) -> AllocationOutcome {
    let mut outcome = AllocationOutcome::default();
    let mut offers_open = true;

    for process in candidates {
        debug_assert!(process.is_waiting());

        if offers_open {
            if ledger.try_grant(process) {
                process.status = ProcessStatus::Running;
                outcome.granted.push(process.id);
                debug!(
                    pid = process.id,
                    policy,
                    need = %process.need,
                    "resources allocated"
                );

                if limit.is_some_and(|max| outcome.granted.len() >= max) {
                    offers_open = false;
                }
                continue;
            }

            process.wait_time += 1;
        } else if accounting == WaitAccounting::Single {
            process.wait_time += 1;
        }

        outcome.still_waiting.push(process.id);
    }

    outcome
}
