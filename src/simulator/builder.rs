/*!
 * Simulator Builder
 * Builder pattern for Simulator construction
 */

use super::config::SimConfig;
use super::Simulator;
use crate::core::errors::SimResult;
use crate::scheduler::{AllocationPolicy, WaitAccounting};

/// Builder for Simulator
#[derive(Debug, Clone, Default)]
pub struct SimulatorBuilder {
    config: SimConfig,
}

impl SimulatorBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Set total cpu cores, memory (MB) and io devices
    pub fn with_capacity(mut self, cpu_cores: u32, memory_mb: u32, io_devices: u32) -> Self {
        self.config.cpu_cores = cpu_cores;
        self.config.memory_mb = memory_mb;
        self.config.io_devices = io_devices;
        self
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Seed the random source for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_initial_processes(mut self, count: usize) -> Self {
        self.config.initial_processes = count;
        self
    }

    pub fn with_deadlock_detection(mut self, enabled: bool) -> Self {
        self.config.deadlock_detection = enabled;
        self
    }

    pub fn with_deadlock_threshold(mut self, threshold: u64) -> Self {
        self.config.deadlock_threshold = threshold;
        self
    }

    pub fn with_wait_accounting(mut self, accounting: WaitAccounting) -> Self {
        self.config.wait_accounting = accounting;
        self
    }

    pub fn with_page_fault_probability(mut self, probability: f64) -> Self {
        self.config.page_fault_probability = probability;
        self
    }

    /// Validate the configuration and build the Simulator
    pub fn build(self) -> SimResult<Simulator> {
        Simulator::new(self.config)
    }
}
