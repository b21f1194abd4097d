/*!
 * Process Generator
 * Resolve a `ProcessSpec` into a concrete process, sampling what it omits
 */

use super::types::{Process, ProcessSpec, ProcessType};
use crate::core::limits::{
    CUSTOM_BURST_RANGE, MAX_PRIORITY, MIN_MEMORY_NEED_MB, MIN_PRIORITY, RANDOM_BURST_RANGE,
};
use crate::core::types::{ProcessId, ResourceVector, Tick};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Names drawn for randomly generated processes
const PROCESS_NAMES: [&str; 16] = [
    "System Init",
    "User Interface",
    "Data Processor",
    "File Handler",
    "Network Service",
    "Security Check",
    "Backup Task",
    "Update Service",
    "Multimedia Player",
    "Print Spooler",
    "Antivirus Scan",
    "Database Query",
    "Web Server",
    "Email Client",
    "Compilation Job",
    "Rendering Task",
];

/// Builds processes from specs against the current capacities
#[derive(Debug, Clone, Copy)]
pub struct ProcessGenerator {
    capacity: ResourceVector,
}

impl ProcessGenerator {
    pub fn new(capacity: ResourceVector) -> Self {
        Self { capacity }
    }

    /// Build process `id`, arriving at `now`
    pub fn generate<R: Rng + ?Sized>(
        &self,
        id: ProcessId,
        spec: &ProcessSpec,
        now: Tick,
        rng: &mut R,
    ) -> Process {
        let process_type = spec
            .process_type
            .unwrap_or_else(|| *ProcessType::ALL.choose(rng).unwrap_or(&ProcessType::Balanced));

        let name = match &spec.name {
            Some(name) => name.clone(),
            None if spec.custom => format!("Custom Process {} ({})", id, process_type),
            None => {
                let base = PROCESS_NAMES.choose(rng).copied().unwrap_or("Process");
                format!("{} ({})", base, process_type)
            }
        };

        let priority = match spec.priority {
            Some(p) if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&p) => {
                let clamped = p.clamp(MIN_PRIORITY, MAX_PRIORITY);
                warn!(pid = id, requested = p, clamped, "priority clamped into range");
                clamped
            }
            Some(p) => p,
            None => rng.gen_range(MIN_PRIORITY..=MAX_PRIORITY),
        };

        let need = ResourceVector::new(
            spec.cpu_need
                .unwrap_or_else(|| self.sample_cpu(process_type, spec.custom, rng)),
            spec.memory_need
                .unwrap_or_else(|| self.sample_memory(process_type, spec.custom, rng)),
            spec.io_need
                .unwrap_or_else(|| self.sample_io(process_type, spec.custom, rng)),
        );

        let burst_time = match spec.burst_time {
            Some(0) => {
                warn!(pid = id, "zero burst raised to 1");
                1
            }
            Some(burst) => burst,
            None => {
                let (lo, hi) = if spec.custom {
                    CUSTOM_BURST_RANGE
                } else {
                    RANDOM_BURST_RANGE
                };
                rng.gen_range(lo..=hi)
            }
        };

        Process::new(id, name, process_type, priority, need, burst_time, now)
    }

    fn sample_cpu<R: Rng + ?Sized>(&self, ty: ProcessType, custom: bool, rng: &mut R) -> u32 {
        let cap = self.capacity.cpu;
        if custom {
            return rng.gen_range(1..=cap.max(1));
        }
        let (m, _, _) = ty.multipliers();
        scaled(rng, cap as f64 * m, 1).min(cap)
    }

    fn sample_memory<R: Rng + ?Sized>(&self, ty: ProcessType, custom: bool, rng: &mut R) -> u32 {
        let cap = self.capacity.memory;
        if custom {
            return rng
                .gen_range(MIN_MEMORY_NEED_MB..MIN_MEMORY_NEED_MB + 100)
                .min(cap);
        }
        let (_, m, _) = ty.multipliers();
        scaled(rng, cap as f64 / 4.0 * m, MIN_MEMORY_NEED_MB).min(cap)
    }

    fn sample_io<R: Rng + ?Sized>(&self, ty: ProcessType, custom: bool, rng: &mut R) -> u32 {
        let cap = self.capacity.io;
        if custom {
            return rng.gen_range(1..=cap.max(1));
        }
        let (_, _, m) = ty.multipliers();
        scaled(rng, cap as f64 * m, 1).min(cap)
    }
}

/// floor(r * span) + base, with r uniform in [0, 1)
fn scaled<R: Rng + ?Sized>(rng: &mut R, span: f64, base: u32) -> u32 {
    (rng.gen::<f64>() * span).floor() as u32 + base
}
