/*!
 * Process Registry
 * Append-only table of every process created during a run
 */

use super::types::{Process, ProcessStatus};
use crate::core::types::ProcessId;
use serde::{Deserialize, Serialize};

/// Number of processes in each lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusCounts {
    pub waiting: usize,
    pub running: usize,
    pub completed: usize,
    pub terminated: usize,
}

impl StatusCounts {
    #[inline]
    pub const fn total(&self) -> usize {
        self.waiting + self.running + self.completed + self.terminated
    }

    /// Every process has reached an absorbing state
    #[inline]
    pub const fn all_terminal(&self) -> bool {
        self.waiting == 0 && self.running == 0
    }
}

/// Owns every process and its lifecycle state
///
/// Processes are never removed, so ids map directly onto positions:
/// id `n` lives at index `n - 1`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next inserted process will receive
    #[inline]
    pub fn next_id(&self) -> ProcessId {
        self.processes.len() as ProcessId + 1
    }

    /// Append a process built for `next_id()`
    pub fn insert(&mut self, process: Process) -> ProcessId {
        debug_assert_eq!(process.id, self.next_id(), "process ids must be dense");
        let id = process.id;
        self.processes.push(process);
        id
    }

    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        let index = (id as usize).checked_sub(1)?;
        self.processes.get(index)
    }

    pub fn get_mut(&mut self, id: ProcessId) -> Option<&mut Process> {
        let index = (id as usize).checked_sub(1)?;
        self.processes.get_mut(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Processes in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.processes.iter_mut()
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Waiting processes in registry order, borrowed mutably for a policy pass
    pub fn waiting_mut(&mut self) -> Vec<&mut Process> {
        self.processes.iter_mut().filter(|p| p.is_waiting()).collect()
    }

    pub fn count(&self, status: ProcessStatus) -> usize {
        self.processes.iter().filter(|p| p.status == status).count()
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.processes
            .iter()
            .fold(StatusCounts::default(), |mut counts, p| {
                match p.status {
                    ProcessStatus::Waiting => counts.waiting += 1,
                    ProcessStatus::Running => counts.running += 1,
                    ProcessStatus::Completed => counts.completed += 1,
                    ProcessStatus::Terminated => counts.terminated += 1,
                }
                counts
            })
    }

    pub fn clear(&mut self) {
        self.processes.clear();
    }
}
