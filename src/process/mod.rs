/*!
 * Process Module
 * Process model, registry, lifecycle transitions, and execution
 */

pub mod execution;
pub mod generator;
pub mod lifecycle;
pub mod registry;
pub mod types;

pub use execution::ExecutionOutcome;
pub use generator::ProcessGenerator;
pub use lifecycle::TerminationCause;
pub use registry::{ProcessRegistry, StatusCounts};
pub use types::{Process, ProcessSpec, ProcessStatus, ProcessType};
