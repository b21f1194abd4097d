/*!
 * Monitoring Module
 * Derived simulation metrics and tracing setup
 */

pub mod metrics;
pub mod tracer;

pub use metrics::{Counters, Metrics, MetricsAggregator, UtilizationSample};
pub use tracer::init_tracing;
