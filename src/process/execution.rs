/*!
 * Execution Phase
 * Advance every running process by one tick of simulated work
 */

use super::lifecycle::complete;
use super::registry::ProcessRegistry;
use super::types::ProcessType;
use crate::core::types::{ProcessId, Tick};
use crate::resources::ResourceLedger;
use crate::scheduler::WaitAccounting;
use rand::Rng;
use tracing::debug;

/// What happened during one execution phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Processes that finished their burst this tick
    pub completed: Vec<ProcessId>,
    /// Page faults raised this tick
    pub page_faults: u64,
}

impl ProcessRegistry {
    /// Run one tick of execution
    ///
    /// Running processes lose one unit of remaining time; memory-intensive
    /// ones page-fault with probability `page_fault_probability`. A process
    /// whose remaining time reaches zero completes at `now` and releases its
    /// resources immediately, so the next allocation pass can reuse them.
    /// Under `WaitAccounting::Double` every still-waiting process is also
    /// charged one wait tick here.
    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        now: Tick,
        ledger: &mut ResourceLedger,
        rng: &mut R,
        page_fault_probability: f64,
        accounting: WaitAccounting,
    ) -> ExecutionOutcome {
        let mut outcome = ExecutionOutcome::default();

        for process in self.iter_mut() {
            if process.is_running() {
                process.remaining_time = process.remaining_time.saturating_sub(1);

                if process.process_type == ProcessType::MemoryIntensive
                    && rng.gen_bool(page_fault_probability)
                {
                    process.page_faults += 1;
                    outcome.page_faults += 1;
                    debug!(pid = process.id, tick = now, "page fault");
                }

                if process.remaining_time == 0 {
                    complete(process, now, ledger);
                    outcome.completed.push(process.id);
                }
            } else if process.is_waiting() && accounting == WaitAccounting::Double {
                process.wait_time += 1;
            }
        }

        outcome
    }
}
