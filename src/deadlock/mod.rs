/*!
 * Deadlock Module
 * Heuristic starvation/deadlock detection and resolution
 */

pub mod monitor;

pub use monitor::{DeadlockMonitor, DeadlockReport};
