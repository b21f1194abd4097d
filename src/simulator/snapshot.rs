/*!
 * Simulation Snapshot
 * Read-only, serializable view of the whole simulator state
 */

use super::config::SimConfig;
use crate::core::types::{ProcessId, Tick};
use crate::monitoring::{Counters, Metrics, UtilizationSample};
use crate::process::{Process, StatusCounts};
use crate::resources::ResourcePool;
use crate::scheduler::AllocationPolicy;
use serde::{Deserialize, Serialize};

/// A process as reported externally, with its derived turnaround
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessView {
    #[serde(flatten)]
    pub process: Process,
    pub turnaround: Option<Tick>,
}

impl From<&Process> for ProcessView {
    fn from(process: &Process) -> Self {
        Self {
            process: process.clone(),
            turnaround: process.turnaround(),
        }
    }
}

/// Capacity and allocation per resource kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceSummary {
    pub cpu: ResourcePool,
    pub memory: ResourcePool,
    pub io: ResourcePool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    pub time: Tick,
    pub policy: AllocationPolicy,
    pub seed: u64,
    pub config: SimConfig,
    pub processes: Vec<ProcessView>,
    pub resources: ResourceSummary,
    pub counters: Counters,
    pub status_counts: StatusCounts,
    pub metrics: Metrics,
    /// Oldest first, at most 20 samples
    pub history: Vec<UtilizationSample>,
    /// Set while the latest monitor pass declared a deadlock
    pub deadlock_warning: bool,
    /// Processes flagged as starving by the latest monitor pass
    pub starving: Vec<ProcessId>,
    pub finished: bool,
}

impl Snapshot {
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes
            .iter()
            .map(|view| &view.process)
            .find(|p| p.id == id)
    }
}
