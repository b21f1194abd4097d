/*!
 * Tick Driver
 * Calls `Simulator::tick` on a wall-clock interval and auto-adds processes
 *
 * The engine holds no clock; this is the external collaborator that does.
 * Stopping the driver is the only form of cancellation.
 */

use crate::simulator::{DriverConfig, Simulator};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::info;

/// Simulator shared between the driver and whoever inspects it
pub type SharedSimulator = Arc<Mutex<Simulator>>;

/// Why the driver loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    /// Every process reached a terminal state
    Finished { tick: u64 },
    /// `max_ticks` was reached
    TickLimit { tick: u64 },
    /// The shutdown future resolved
    Shutdown { tick: u64 },
}

pub struct Driver {
    sim: SharedSimulator,
    config: DriverConfig,
}

impl Driver {
    /// Configuration is taken as given; validation belongs to `SimConfig`
    pub fn new(sim: SharedSimulator, config: DriverConfig) -> Self {
        Self { sim, config }
    }

    pub fn simulator(&self) -> SharedSimulator {
        Arc::clone(&self.sim)
    }

    /// Drive the simulation until it finishes, hits the tick limit, or
    /// `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> DriverExit
    where
        F: Future<Output = ()>,
    {
        let period = Duration::from_millis(self.config.tick_interval_ms.max(1));
        let mut ticker = periodic(period);

        let mut auto_add = (self.config.auto_add_secs > 0)
            .then(|| periodic(Duration::from_secs(self.config.auto_add_secs)));

        info!(
            tick_interval_ms = self.config.tick_interval_ms,
            auto_add_secs = self.config.auto_add_secs,
            max_ticks = ?self.config.max_ticks,
            "driver started"
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    let tick = self.sim.lock().time();
                    info!(tick, "driver shutdown requested");
                    return DriverExit::Shutdown { tick };
                }
                _ = ticker.tick() => {
                    if let Some(exit) = self.step() {
                        info!(exit = ?exit, "driver stopped");
                        return exit;
                    }
                }
                _ = next_auto_add(&mut auto_add) => {
                    let id = self.sim.lock().add_random_process();
                    info!(pid = id, "auto-added process");
                }
            }
        }
    }

    /// Advance one tick and report whether the loop should end
    fn step(&self) -> Option<DriverExit> {
        let mut sim = self.sim.lock();
        sim.tick();
        let tick = sim.time();

        if sim.is_finished() {
            return Some(DriverExit::Finished { tick });
        }
        match self.config.max_ticks {
            Some(max) if tick >= max => Some(DriverExit::TickLimit { tick }),
            _ => None,
        }
    }
}

fn periodic(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_auto_add(auto_add: &mut Option<Interval>) {
    match auto_add {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
