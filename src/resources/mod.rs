/*!
 * Resources Module
 * Multi-resource ledger shared by every allocation policy
 */

pub mod ledger;

pub use ledger::{ResourceLedger, ResourcePool};
