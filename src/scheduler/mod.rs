/*!
 * Scheduler Module
 * Pluggable allocation policies deciding which waiting processes get resources
 */

pub mod policies;
pub mod traits;
pub mod types;

pub use policies::{allocate, Adaptive, Fcfs, PriorityFirst, RoundRobin};
pub use traits::{AllocationOutcome, Allocator};
pub use types::{AllocationPolicy, WaitAccounting};
