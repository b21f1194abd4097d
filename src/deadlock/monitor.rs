/*!
 * Deadlock Monitor
 * Wait-time heuristic: flags starvation and force-terminates a victim
 *
 * This is not wait-for-graph detection. A "deadlock" is declared when nothing
 * is running, something is waiting, and at least one waiting process has
 * waited longer than the threshold. The victim is always waiting, so holds
 * nothing; terminating it shrinks contention rather than freeing capacity.
 */

use crate::core::limits::DEFAULT_DEADLOCK_THRESHOLD;
use crate::core::types::{ProcessId, Tick};
use crate::process::{ProcessRegistry, TerminationCause};
use crate::resources::ResourceLedger;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Findings of one monitor pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DeadlockReport {
    /// Waiting processes whose wait time exceeds the threshold
    pub starving: Vec<ProcessId>,
    /// Whether this pass declared a deadlock
    pub deadlock: bool,
    /// Process terminated to break the deadlock
    pub victim: Option<ProcessId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlockMonitor {
    threshold: u64,
}

impl Default for DeadlockMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_DEADLOCK_THRESHOLD)
    }
}

impl DeadlockMonitor {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    #[inline]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Inspect the waiting set and resolve a suspected deadlock
    ///
    /// The victim is the lowest-priority waiting process; ties go to the
    /// earliest in registry order.
    pub fn run(
        &self,
        registry: &mut ProcessRegistry,
        ledger: &mut ResourceLedger,
        now: Tick,
    ) -> DeadlockReport {
        let mut report = DeadlockReport::default();

        for process in registry.iter().filter(|p| p.is_waiting()) {
            if process.wait_time > self.threshold {
                warn!(
                    pid = process.id,
                    wait_time = process.wait_time,
                    "process waiting too long, possible deadlock"
                );
                report.starving.push(process.id);
            }
        }

        if report.starving.is_empty() {
            return report;
        }

        let counts = registry.status_counts();
        if counts.running > 0 || counts.waiting == 0 {
            return report;
        }

        // min_by_key keeps the first of equal minima
        let victim = registry
            .iter()
            .filter(|p| p.is_waiting())
            .min_by_key(|p| p.priority)
            .map(|p| p.id);

        report.deadlock = true;
        error!(
            tick = now,
            blocked = counts.waiting,
            victim = ?victim,
            "deadlock detected"
        );

        if let Some(id) = victim {
            if registry.terminate(id, now, ledger, TerminationCause::DeadlockResolution) {
                report.victim = Some(id);
            }
        }

        report
    }
}
