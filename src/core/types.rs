/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process ID type (assigned from 1 upwards, never reused)
pub type ProcessId = u32;

/// Simulated time, in ticks since the run started
pub type Tick = u64;

/// Priority level (1-10, higher is more important)
pub type Priority = u8;

/// The three resource kinds tracked by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Cpu,
    Memory,
    Io,
}

impl ResourceKind {
    /// All kinds, in ledger order
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Cpu, ResourceKind::Memory, ResourceKind::Io];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One integer amount per resource kind
///
/// Used both for a process's need/allocation and for ledger capacity totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceVector {
    pub cpu: u32,
    pub memory: u32,
    pub io: u32,
}

impl ResourceVector {
    pub const ZERO: ResourceVector = ResourceVector {
        cpu: 0,
        memory: 0,
        io: 0,
    };

    #[inline]
    #[must_use]
    pub const fn new(cpu: u32, memory: u32, io: u32) -> Self {
        Self { cpu, memory, io }
    }

    #[inline]
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Cpu => self.cpu,
            ResourceKind::Memory => self.memory,
            ResourceKind::Io => self.io,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Cpu => &mut self.cpu,
            ResourceKind::Memory => &mut self.memory,
            ResourceKind::Io => &mut self.io,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.cpu == 0 && self.memory == 0 && self.io == 0
    }

    /// True when every component fits inside `other`
    #[inline]
    #[must_use]
    pub const fn fits_within(&self, other: &ResourceVector) -> bool {
        self.cpu <= other.cpu && self.memory <= other.memory && self.io <= other.io
    }

    /// Packing weight used by the adaptive policy: memory counts per 100 MB
    #[inline]
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.cpu as f64 + self.memory as f64 / 100.0 + self.io as f64
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(cpu={}, memory={}MB, io={})", self.cpu, self.memory, self.io)
    }
}
