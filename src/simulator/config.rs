/*!
 * Simulator Configuration
 * Serde-backed configuration with boundary validation
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    AUTO_ADD_SECS_CHOICES, CPU_CORES_RANGE, DEFAULT_DEADLOCK_THRESHOLD,
    DEFAULT_PAGE_FAULT_PROBABILITY, INITIAL_PROCESSES_RANGE, IO_DEVICES_RANGE, MEMORY_MB_RANGE,
    TICK_INTERVAL_MS_RANGE,
};
use crate::core::types::ResourceVector;
use crate::scheduler::{AllocationPolicy, WaitAccounting};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use tracing::debug;

/// Settings for the external tick driver; the engine never reads these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct DriverConfig {
    /// Wall-clock delay between ticks
    pub tick_interval_ms: u64,
    /// Add a random process every this many seconds, 0 disables
    pub auto_add_secs: u64,
    /// Stop after this many ticks even if processes remain
    pub max_ticks: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            auto_add_secs: 0,
            max_ticks: None,
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SimConfig {
    pub cpu_cores: u32,
    pub memory_mb: u32,
    pub io_devices: u32,
    /// Random processes created when the simulator is (re)initialized
    pub initial_processes: usize,
    pub deadlock_detection: bool,
    pub deadlock_threshold: u64,
    pub page_fault_probability: f64,
    pub wait_accounting: WaitAccounting,
    pub policy: AllocationPolicy,
    /// Fixed seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,
    pub driver: DriverConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cpu_cores: 2,
            memory_mb: 512,
            io_devices: 3,
            initial_processes: 5,
            deadlock_detection: true,
            deadlock_threshold: DEFAULT_DEADLOCK_THRESHOLD,
            page_fault_probability: DEFAULT_PAGE_FAULT_PROBABILITY,
            wait_accounting: WaitAccounting::default(),
            policy: AllocationPolicy::default(),
            seed: None,
            driver: DriverConfig::default(),
        }
    }
}

impl SimConfig {
    /// Total capacity per resource kind
    #[inline]
    pub fn capacity(&self) -> ResourceVector {
        ResourceVector::new(self.cpu_cores, self.memory_mb, self.io_devices)
    }

    /// Reject any value outside its documented bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("cpu_cores", self.cpu_cores, CPU_CORES_RANGE)?;
        check_range("memory_mb", self.memory_mb, MEMORY_MB_RANGE)?;
        check_range("io_devices", self.io_devices, IO_DEVICES_RANGE)?;
        check_range(
            "initial_processes",
            self.initial_processes,
            INITIAL_PROCESSES_RANGE,
        )?;

        if self.deadlock_threshold == 0 {
            return Err(ConfigError::out_of_range(
                "deadlock_threshold",
                0,
                1,
                u64::MAX,
            ));
        }

        if !(0.0..=1.0).contains(&self.page_fault_probability) {
            return Err(ConfigError::out_of_range(
                "page_fault_probability",
                self.page_fault_probability,
                0.0,
                1.0,
            ));
        }

        check_range(
            "driver.tick_interval_ms",
            self.driver.tick_interval_ms,
            TICK_INTERVAL_MS_RANGE,
        )?;

        if !AUTO_ADD_SECS_CHOICES.contains(&self.driver.auto_add_secs) {
            return Err(ConfigError::InvalidChoice {
                field: "driver.auto_add_secs".into(),
                value: self.driver.auto_add_secs.to_string(),
                allowed: format!("{:?}", AUTO_ADD_SECS_CHOICES),
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&raw)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from the environment
    ///
    /// - SIM_CONFIG: path to a JSON configuration file (defaults otherwise)
    /// - SIM_SEED: fixed random seed
    /// - SIM_POLICY: allocation policy name
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("SIM_CONFIG") {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(seed) = std::env::var("SIM_SEED") {
            let seed = seed
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Parse(format!("SIM_SEED: {}", e)))?;
            config.seed = Some(seed);
        }

        if let Ok(policy) = std::env::var("SIM_POLICY") {
            config.policy = policy.parse().map_err(|_| ConfigError::InvalidChoice {
                field: "SIM_POLICY".into(),
                value: policy.clone(),
                allowed: "adaptive, roundrobin, priority, fcfs".into(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn check_range<T: PartialOrd + Display>(
    field: &str,
    value: T,
    (min, max): (T, T),
) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::out_of_range(field, value, min, max));
    }
    Ok(())
}
