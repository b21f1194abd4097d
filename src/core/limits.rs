/*!
 * Simulation Limits
 * Centralized bounds and tuning constants
 */

use super::types::Priority;

// Process priority bounds
pub const MIN_PRIORITY: Priority = 1;
pub const MAX_PRIORITY: Priority = 10;

/// Wait ticks a process may exceed before the deadlock monitor flags it
pub const DEFAULT_DEADLOCK_THRESHOLD: u64 = 10;

/// Utilization samples retained for charting
pub const UTILIZATION_HISTORY_LEN: usize = 20;

/// Chance per tick that a running memory-intensive process page-faults
pub const DEFAULT_PAGE_FAULT_PROBABILITY: f64 = 0.1;

/// A status summary is logged every this many ticks
pub const SYSTEM_CHECK_INTERVAL: u64 = 5;

// Configuration bounds
pub const CPU_CORES_RANGE: (u32, u32) = (1, 8);
pub const MEMORY_MB_RANGE: (u32, u32) = (100, 2000);
pub const IO_DEVICES_RANGE: (u32, u32) = (1, 10);
pub const INITIAL_PROCESSES_RANGE: (usize, usize) = (0, 20);
pub const TICK_INTERVAL_MS_RANGE: (u64, u64) = (100, 2000);
pub const AUTO_ADD_SECS_CHOICES: [u64; 4] = [0, 5, 10, 15];

// Random burst ranges (inclusive)
pub const RANDOM_BURST_RANGE: (u64, u64) = (3, 12);
pub const CUSTOM_BURST_RANGE: (u64, u64) = (2, 9);

/// Minimum memory need of a generated process, in MB
pub const MIN_MEMORY_NEED_MB: u32 = 50;
