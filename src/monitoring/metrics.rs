/*!
 * Metrics Aggregation
 * Derived utilization, throughput and timing averages, plus a bounded
 * utilization history for charting
 */

use crate::core::limits::UTILIZATION_HISTORY_LEN;
use crate::core::types::{ResourceKind, Tick};
use crate::process::{ProcessRegistry, ProcessStatus};
use crate::resources::ResourceLedger;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Event counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Counters {
    /// One per successful grant
    pub context_switches: u64,
    pub page_faults: u64,
    /// Deadlock events declared by the monitor
    pub deadlocks: u64,
}

/// Per-kind utilization at one tick, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UtilizationSample {
    pub tick: Tick,
    pub cpu: f64,
    pub memory: f64,
    pub io: f64,
}

/// Derived metrics, recomputed every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Metrics {
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub io_utilization: f64,
    /// Completed processes per 60 ticks
    pub throughput: f64,
    /// Mean wait time over every process ever created
    pub avg_wait_time: f64,
    /// Mean turnaround over completed processes
    pub avg_turnaround_time: f64,
    pub completed: usize,
    pub total_processes: usize,
}

/// Recomputes `Metrics` from registry and ledger state and keeps the
/// most recent utilization samples
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    latest: Metrics,
    history: VecDeque<UtilizationSample>,
    history_len: usize,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(UTILIZATION_HISTORY_LEN)
    }
}

impl MetricsAggregator {
    pub fn new(history_len: usize) -> Self {
        Self {
            latest: Metrics::default(),
            history: VecDeque::with_capacity(history_len),
            history_len,
        }
    }

    /// Recompute metrics and append a utilization sample for `now`
    pub fn update(&mut self, registry: &ProcessRegistry, ledger: &ResourceLedger, now: Tick) {
        self.latest = Self::compute(registry, ledger, now);
        self.record_sample(UtilizationSample {
            tick: now,
            cpu: self.latest.cpu_utilization,
            memory: self.latest.memory_utilization,
            io: self.latest.io_utilization,
        });
    }

    /// Pure derivation, no history side effects
    pub fn compute(registry: &ProcessRegistry, ledger: &ResourceLedger, now: Tick) -> Metrics {
        let total_processes = registry.len();
        let mut completed = 0usize;
        let mut total_wait = 0u64;
        let mut total_turnaround = 0u64;

        for process in registry.iter() {
            total_wait += process.wait_time;
            if process.status == ProcessStatus::Completed {
                completed += 1;
                total_turnaround += process.turnaround().unwrap_or_default();
            }
        }

        let throughput = if now == 0 {
            0.0
        } else {
            completed as f64 * 60.0 / now as f64
        };

        Metrics {
            cpu_utilization: ledger.utilization(ResourceKind::Cpu),
            memory_utilization: ledger.utilization(ResourceKind::Memory),
            io_utilization: ledger.utilization(ResourceKind::Io),
            throughput,
            avg_wait_time: ratio(total_wait, total_processes),
            avg_turnaround_time: ratio(total_turnaround, completed),
            completed,
            total_processes,
        }
    }

    fn record_sample(&mut self, sample: UtilizationSample) {
        if self.history_len == 0 {
            return;
        }
        while self.history.len() >= self.history_len {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }

    #[inline]
    pub fn latest(&self) -> Metrics {
        self.latest
    }

    /// Oldest first
    pub fn history(&self) -> Vec<UtilizationSample> {
        self.history.iter().copied().collect()
    }

    pub fn reset(&mut self) {
        self.latest = Metrics::default();
        self.history.clear();
    }
}

fn ratio(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
