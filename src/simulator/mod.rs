/*!
 * Simulator
 * Owns the registry, ledger and counters, and advances them one tick at a time
 *
 * Per tick:
 * 1. advance the clock
 * 2. release anything still held by terminal processes
 * 3. allocation pass of the active policy
 * 4. deadlock monitor pass (when enabled)
 * 5. execution: running processes make progress, completions release
 * 6. metrics recompute
 *
 * A process executes during the tick it is granted, and resources freed by a
 * completion become grantable on the following tick.
 */

mod builder;
pub mod config;
pub mod snapshot;

pub use builder::SimulatorBuilder;
pub use config::{DriverConfig, SimConfig};
pub use snapshot::{ProcessView, ResourceSummary, Snapshot};

use crate::core::errors::{SimError, SimResult};
use crate::core::limits::SYSTEM_CHECK_INTERVAL;
use crate::core::types::{ProcessId, ResourceKind, Tick};
use crate::deadlock::{DeadlockMonitor, DeadlockReport};
use crate::monitoring::{Counters, Metrics, MetricsAggregator};
use crate::process::{
    Process, ProcessGenerator, ProcessRegistry, ProcessSpec, StatusCounts, TerminationCause,
};
use crate::resources::ResourceLedger;
use crate::scheduler::{allocate, AllocationPolicy};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, debug_span, info};

/// The simulation engine
///
/// Single-threaded and step-driven: nothing happens between calls. An external
/// driver decides when to call `tick()`.
#[derive(Debug)]
pub struct Simulator {
    config: SimConfig,
    seed: u64,
    time: Tick,
    policy: AllocationPolicy,
    ledger: ResourceLedger,
    registry: ProcessRegistry,
    generator: ProcessGenerator,
    monitor: Option<DeadlockMonitor>,
    metrics: MetricsAggregator,
    counters: Counters,
    last_report: DeadlockReport,
    rng: StdRng,
    finished_reported: bool,
}

impl Simulator {
    /// Create a simulator from a configuration
    ///
    /// Validates the configuration, then spawns `initial_processes` random
    /// processes at tick 0.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().next_u64());

        let mut sim = Self {
            seed,
            time: 0,
            policy: config.policy,
            ledger: ResourceLedger::new(config.capacity()),
            registry: ProcessRegistry::new(),
            generator: ProcessGenerator::new(config.capacity()),
            monitor: None,
            metrics: MetricsAggregator::default(),
            counters: Counters::default(),
            last_report: DeadlockReport::default(),
            rng: StdRng::seed_from_u64(seed),
            finished_reported: false,
            config,
        };
        sim.initialize();
        Ok(sim)
    }

    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    /// Rebuild all run state from the current configuration and seed
    fn initialize(&mut self) {
        let capacity = self.config.capacity();
        self.time = 0;
        self.policy = self.config.policy;
        self.ledger = ResourceLedger::new(capacity);
        self.registry.clear();
        self.generator = ProcessGenerator::new(capacity);
        self.monitor = self
            .config
            .deadlock_detection
            .then(|| DeadlockMonitor::new(self.config.deadlock_threshold));
        self.metrics.reset();
        self.counters = Counters::default();
        self.last_report = DeadlockReport::default();
        self.rng = StdRng::seed_from_u64(self.seed);
        self.finished_reported = false;

        for _ in 0..self.config.initial_processes {
            self.add_process(ProcessSpec::random());
        }

        info!(
            capacity = %capacity,
            processes = self.registry.len(),
            policy = %self.policy,
            seed = self.seed,
            "simulation initialized"
        );
    }

    /// Advance simulated time by one tick
    pub fn tick(&mut self) {
        self.time += 1;
        let now = self.time;
        let _span = debug_span!("tick", tick = now, policy = %self.policy).entered();

        self.registry.release_terminal(&mut self.ledger);

        let outcome = allocate(
            self.policy,
            self.registry.waiting_mut(),
            &mut self.ledger,
            self.config.wait_accounting,
        );
        self.counters.context_switches += outcome.context_switches();
        if !outcome.granted.is_empty() {
            debug!(granted = ?outcome.granted, waiting = outcome.still_waiting.len(), "allocation pass");
        }

        if let Some(monitor) = self.monitor {
            let report = monitor.run(&mut self.registry, &mut self.ledger, now);
            if report.deadlock {
                self.counters.deadlocks += 1;
            }
            self.last_report = report;
        }

        let execution = self.registry.execute(
            now,
            &mut self.ledger,
            &mut self.rng,
            self.config.page_fault_probability,
            self.config.wait_accounting,
        );
        self.counters.page_faults += execution.page_faults;

        self.metrics.update(&self.registry, &self.ledger, now);

        let counts = self.registry.status_counts();
        if now % SYSTEM_CHECK_INTERVAL == 0 {
            info!(
                tick = now,
                running = counts.running,
                waiting = counts.waiting,
                completed = counts.completed,
                terminated = counts.terminated,
                "system check"
            );
        }

        if self.is_finished() && !self.finished_reported {
            self.finished_reported = true;
            info!(tick = now, processes = counts.total(), "all processes finished");
        }
    }

    /// Add a process arriving now; omitted spec fields are randomized
    pub fn add_process(&mut self, spec: ProcessSpec) -> ProcessId {
        let id = self.registry.next_id();
        let process = self.generator.generate(id, &spec, self.time, &mut self.rng);
        info!(
            pid = id,
            name = %process.name,
            priority = process.priority,
            need = %process.need,
            burst = process.burst_time,
            "process created"
        );
        self.finished_reported = false;
        self.registry.insert(process)
    }

    /// Add a fully random process
    pub fn add_random_process(&mut self) -> ProcessId {
        self.add_process(ProcessSpec::random())
    }

    /// Terminate a waiting or running process
    ///
    /// Unknown ids and already-terminal processes are ignored (returns false).
    pub fn terminate(&mut self, id: ProcessId) -> bool {
        self.registry
            .terminate(id, self.time, &mut self.ledger, TerminationCause::Manual)
    }

    /// Switch allocation policy; takes effect on the next tick
    pub fn set_policy(&mut self, policy: AllocationPolicy) {
        if policy != self.policy {
            info!(from = %self.policy, to = %policy, "allocation policy changed");
        }
        self.policy = policy;
        self.config.policy = policy;
    }

    /// Switch allocation policy by name
    pub fn set_policy_by_name(&mut self, name: &str) -> SimResult<()> {
        let policy = name.parse()?;
        self.set_policy(policy);
        Ok(())
    }

    /// Replace the configuration before the run starts
    ///
    /// Rejected once the first tick has happened. On success the simulator is
    /// reinitialized against the new capacities.
    pub fn configure(&mut self, config: SimConfig) -> SimResult<()> {
        if self.time > 0 {
            return Err(SimError::AlreadyStarted { tick: self.time });
        }
        config.validate()?;
        if let Some(seed) = config.seed {
            self.seed = seed;
        }
        self.config = config;
        self.initialize();
        Ok(())
    }

    /// Discard all run state and start over with the current configuration
    pub fn reset(&mut self) {
        info!(tick = self.time, "simulation reset");
        self.initialize();
    }

    /// Read-only view of everything the simulator tracks
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            policy: self.policy,
            seed: self.seed,
            config: self.config.clone(),
            processes: self.registry.iter().map(Into::into).collect(),
            resources: ResourceSummary {
                cpu: self.ledger.pool(ResourceKind::Cpu),
                memory: self.ledger.pool(ResourceKind::Memory),
                io: self.ledger.pool(ResourceKind::Io),
            },
            counters: self.counters,
            status_counts: self.registry.status_counts(),
            metrics: self.metrics(),
            history: self.metrics.history(),
            deadlock_warning: self.last_report.deadlock,
            starving: self.last_report.starving.clone(),
            finished: self.is_finished(),
        }
    }

    #[inline]
    pub fn time(&self) -> Tick {
        self.time
    }

    #[inline]
    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.registry.get(id)
    }

    pub fn processes(&self) -> &[Process] {
        self.registry.as_slice()
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Metrics derived from the current state
    pub fn metrics(&self) -> Metrics {
        MetricsAggregator::compute(&self.registry, &self.ledger, self.time)
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.registry.status_counts()
    }

    /// Findings of the most recent deadlock monitor pass
    pub fn last_deadlock_report(&self) -> &DeadlockReport {
        &self.last_report
    }

    /// True once at least one process exists and all have reached a terminal state
    pub fn is_finished(&self) -> bool {
        !self.registry.is_empty() && self.registry.status_counts().all_terminal()
    }
}
