/*!
 * Process Lifecycle
 * Terminal transitions and resource cleanup
 *
 * waiting -> running happens only inside an allocation pass (see `scheduler`).
 * running -> completed happens in the execution phase (see `execution`).
 * Everything that ends a process and gives its resources back lives here.
 */

use super::registry::ProcessRegistry;
use super::types::{Process, ProcessStatus};
use crate::core::types::{ProcessId, Tick};
use crate::resources::ResourceLedger;
use tracing::{debug, info, warn};

/// Why a process was terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    Manual,
    DeadlockResolution,
}

impl ProcessRegistry {
    /// Terminate a waiting or running process, releasing what it holds
    ///
    /// Returns false (and does nothing) for unknown ids and for processes
    /// that already reached a terminal state.
    pub fn terminate(
        &mut self,
        id: ProcessId,
        now: Tick,
        ledger: &mut ResourceLedger,
        cause: TerminationCause,
    ) -> bool {
        let Some(process) = self.get_mut(id) else {
            debug!(pid = id, "terminate ignored: unknown process");
            return false;
        };

        if process.is_terminal() {
            debug!(pid = id, status = %process.status, "terminate ignored: already terminal");
            return false;
        }

        ledger.release(process);
        process.status = ProcessStatus::Terminated;
        process.completion_time = Some(now);

        warn!(pid = id, tick = now, cause = ?cause, "process terminated");
        true
    }

    /// Release allocations still held by terminal processes
    ///
    /// Runs before every allocation pass. Completion and termination already
    /// release eagerly, so this normally finds nothing.
    pub fn release_terminal(&mut self, ledger: &mut ResourceLedger) -> usize {
        let mut released = 0;
        for process in self
            .iter_mut()
            .filter(|p| p.is_terminal() && !p.allocated.is_zero())
        {
            ledger.release(process);
            released += 1;
        }
        if released > 0 {
            debug!(count = released, "released resources of terminal processes");
        }
        released
    }
}

/// Move a running process to completed at `now` and free its resources
pub(super) fn complete(process: &mut Process, now: Tick, ledger: &mut ResourceLedger) {
    debug_assert!(process.is_running());
    process.status = ProcessStatus::Completed;
    process.completion_time = Some(now);
    ledger.release(process);

    info!(
        pid = process.id,
        tick = now,
        turnaround = process.turnaround().unwrap_or_default(),
        "process completed"
    );
}
