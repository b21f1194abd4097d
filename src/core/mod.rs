/*!
 * Core Module
 * Shared types, limits, and errors
 */

pub mod errors;
pub mod limits;
pub mod types;

pub use errors::{ConfigError, SimError, SimResult};
pub use types::{Priority, ProcessId, ResourceKind, ResourceVector, Tick};
