/*!
 * Resource Allocation Simulator Library
 * Tick-driven model of processes competing for cpu, memory and io capacity
 */

pub mod core;
pub mod deadlock;
pub mod driver;
pub mod monitoring;
pub mod process;
pub mod resources;
pub mod scheduler;
pub mod simulator;

// Re-exports
pub use crate::core::{ConfigError, ProcessId, ResourceKind, ResourceVector, SimError, SimResult, Tick};
pub use deadlock::{DeadlockMonitor, DeadlockReport};
pub use driver::{Driver, DriverExit, SharedSimulator};
pub use monitoring::{init_tracing, Counters, Metrics, MetricsAggregator, UtilizationSample};
pub use process::{Process, ProcessRegistry, ProcessSpec, ProcessStatus, ProcessType, StatusCounts};
pub use resources::{ResourceLedger, ResourcePool};
pub use scheduler::{AllocationOutcome, AllocationPolicy, Allocator, WaitAccounting};
pub use simulator::{DriverConfig, SimConfig, Simulator, SimulatorBuilder, Snapshot};
