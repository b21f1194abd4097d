/*!
 * Resource Ledger
 * Capacity versus allocation bookkeeping with all-or-nothing grants
 */

use crate::core::types::{ResourceKind, ResourceVector};
use crate::process::Process;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Point-in-time view of one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourcePool {
    pub kind: ResourceKind,
    pub capacity: u32,
    pub allocated: u32,
    pub available: u32,
    /// allocated / capacity, in percent
    pub utilization: f64,
}

/// Tracks total capacity and allocated amounts for cpu, memory and io
///
/// Invariant: `allocated <= capacity` for every kind, and `allocated` always
/// equals the sum of `allocated` over all running processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLedger {
    capacity: ResourceVector,
    allocated: ResourceVector,
}

impl ResourceLedger {
    /// Create a ledger with nothing allocated
    ///
    /// Capacities are expected to be validated (positive) by the caller.
    pub fn new(capacity: ResourceVector) -> Self {
        Self {
            capacity,
            allocated: ResourceVector::ZERO,
        }
    }

    #[inline]
    pub fn capacity(&self) -> ResourceVector {
        self.capacity
    }

    #[inline]
    pub fn allocated(&self) -> ResourceVector {
        self.allocated
    }

    /// Capacity minus allocated for one kind
    #[inline]
    pub fn available(&self, kind: ResourceKind) -> u32 {
        self.capacity.get(kind) - self.allocated.get(kind)
    }

    /// Capacity minus allocated for every kind
    pub fn available_vector(&self) -> ResourceVector {
        ResourceVector::new(
            self.available(ResourceKind::Cpu),
            self.available(ResourceKind::Memory),
            self.available(ResourceKind::Io),
        )
    }

    /// Grant the process its full need, or nothing at all
    ///
    /// On success `process.allocated == process.need` and the totals grow by
    /// the same amount. The caller is responsible for moving the process to
    /// `Running`.
    pub fn try_grant(&mut self, process: &mut Process) -> bool {
        debug_assert!(
            process.allocated.is_zero(),
            "grant requested for process {} that already holds resources",
            process.id
        );

        if !process.need.fits_within(&self.available_vector()) {
            return false;
        }

        for kind in ResourceKind::ALL {
            *self.allocated.get_mut(kind) += process.need.get(kind);
        }
        process.allocated = process.need;

        trace!(pid = process.id, need = %process.need, allocated = %self.allocated, "grant");
        true
    }

    /// Return whatever the process holds to the pool
    ///
    /// Idempotent: a process holding nothing leaves the ledger untouched.
    pub fn release(&mut self, process: &mut Process) {
        if process.allocated.is_zero() {
            return;
        }

        for kind in ResourceKind::ALL {
            let held = process.allocated.get(kind);
            let total = self.allocated.get_mut(kind);
            debug_assert!(*total >= held, "ledger underflow on {}", kind);
            *total = total.saturating_sub(held);
        }

        trace!(pid = process.id, released = %process.allocated, "release");
        process.allocated = ResourceVector::ZERO;
    }

    /// allocated / capacity * 100 for one kind
    pub fn utilization(&self, kind: ResourceKind) -> f64 {
        let capacity = self.capacity.get(kind);
        if capacity == 0 {
            return 0.0;
        }
        self.allocated.get(kind) as f64 / capacity as f64 * 100.0
    }

    pub fn pool(&self, kind: ResourceKind) -> ResourcePool {
        ResourcePool {
            kind,
            capacity: self.capacity.get(kind),
            allocated: self.allocated.get(kind),
            available: self.available(kind),
            utilization: self.utilization(kind),
        }
    }

    /// One pool view per kind, in cpu, memory, io order
    pub fn pools(&self) -> [ResourcePool; 3] {
        ResourceKind::ALL.map(|kind| self.pool(kind))
    }
}
