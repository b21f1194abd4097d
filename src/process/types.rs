/*!
 * Process Types
 * Simulated jobs, their lifecycle states, and creation specs
 */

use crate::core::types::{Priority, ProcessId, ResourceVector, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process lifecycle state
///
/// `Waiting` is initial; `Completed` and `Terminated` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Queued for a resource grant
    Waiting,
    /// Holding its full need and executing
    Running,
    /// Ran its whole burst
    Completed,
    /// Killed manually or by the deadlock monitor
    Terminated,
}

impl ProcessStatus {
    #[inline(always)]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Terminated)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workload profile; drives need sampling and page-fault simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    CpuIntensive,
    MemoryIntensive,
    IoIntensive,
    Balanced,
}

impl ProcessType {
    pub const ALL: [ProcessType; 4] = [
        ProcessType::CpuIntensive,
        ProcessType::MemoryIntensive,
        ProcessType::IoIntensive,
        ProcessType::Balanced,
    ];

    /// Need multipliers as (cpu, memory, io)
    pub const fn multipliers(&self) -> (f64, f64, f64) {
        match self {
            Self::CpuIntensive => (2.0, 0.5, 0.3),
            Self::MemoryIntensive => (0.5, 2.0, 0.5),
            Self::IoIntensive => (0.3, 0.7, 2.0),
            Self::Balanced => (1.0, 1.0, 1.0),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::CpuIntensive => "CPU Intensive",
            Self::MemoryIntensive => "Memory Intensive",
            Self::IoIntensive => "I/O Intensive",
            Self::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A simulated job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    #[serde(rename = "type")]
    pub process_type: ProcessType,
    pub priority: Priority,
    pub need: ResourceVector,
    pub allocated: ResourceVector,
    pub burst_time: u64,
    pub remaining_time: u64,
    pub status: ProcessStatus,
    pub wait_time: u64,
    pub arrival_time: Tick,
    pub completion_time: Option<Tick>,
    pub page_faults: u64,
}

impl Process {
    /// Create a process in the waiting state
    #[must_use]
    pub fn new(
        id: ProcessId,
        name: String,
        process_type: ProcessType,
        priority: Priority,
        need: ResourceVector,
        burst_time: u64,
        arrival_time: Tick,
    ) -> Self {
        Self {
            id,
            name,
            process_type,
            priority,
            need,
            allocated: ResourceVector::ZERO,
            burst_time,
            remaining_time: burst_time,
            status: ProcessStatus::Waiting,
            wait_time: 0,
            arrival_time,
            completion_time: None,
            page_faults: 0,
        }
    }

    #[inline(always)]
    pub const fn is_waiting(&self) -> bool {
        matches!(self.status, ProcessStatus::Waiting)
    }

    #[inline(always)]
    pub const fn is_running(&self) -> bool {
        matches!(self.status, ProcessStatus::Running)
    }

    #[inline(always)]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Turnaround time, once the process has finished
    pub fn turnaround(&self) -> Option<Tick> {
        self.completion_time
            .map(|done| done.saturating_sub(self.arrival_time))
    }

    /// Executed fraction of the burst, in percent
    pub fn progress_percent(&self) -> f64 {
        if self.burst_time == 0 {
            return 100.0;
        }
        (self.burst_time - self.remaining_time) as f64 / self.burst_time as f64 * 100.0
    }
}

/// Creation request for `Simulator::add_process`
///
/// Every omitted field is sampled from the process-type profile against the
/// current capacities. Explicit needs are taken as-is, so a need larger than
/// capacity yields a process that can never be granted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ProcessSpec {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub process_type: Option<ProcessType>,
    pub priority: Option<Priority>,
    pub cpu_need: Option<u32>,
    pub memory_need: Option<u32>,
    pub io_need: Option<u32>,
    pub burst_time: Option<u64>,
    /// Sample with the narrower "custom process" distribution
    pub custom: bool,
}

impl ProcessSpec {
    /// Fully randomized spec
    pub fn random() -> Self {
        Self::default()
    }

    /// Randomized spec using the custom-process distribution
    pub fn custom() -> Self {
        Self {
            custom: true,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, process_type: ProcessType) -> Self {
        self.process_type = Some(process_type);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_need(mut self, cpu: u32, memory: u32, io: u32) -> Self {
        self.cpu_need = Some(cpu);
        self.memory_need = Some(memory);
        self.io_need = Some(io);
        self
    }

    pub fn with_burst(mut self, burst_time: u64) -> Self {
        self.burst_time = Some(burst_time);
        self
    }
}
