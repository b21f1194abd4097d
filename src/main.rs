/*!
 * Resource Allocation Simulator - Main Entry Point
 *
 * Loads configuration from the environment, drives the simulation on a
 * wall-clock interval until it finishes (or Ctrl+C), then prints the final
 * snapshot as JSON.
 */

use miette::IntoDiagnostic;
use parking_lot::Mutex;
use resource_sim::{init_tracing, Driver, SimConfig, Simulator};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    info!("Resource allocation simulator starting...");

    let config = SimConfig::from_env()?;
    let driver_config = config.driver;
    let sim = Simulator::new(config)?;

    info!(
        seed = sim.seed(),
        policy = %sim.policy(),
        processes = sim.processes().len(),
        "Simulator ready"
    );

    let shared = Arc::new(Mutex::new(sim));
    let exit = Driver::new(Arc::clone(&shared), driver_config)
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Could not listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await;

    let snapshot = shared.lock().snapshot();
    info!(
        exit = ?exit,
        completed = snapshot.status_counts.completed,
        terminated = snapshot.status_counts.terminated,
        context_switches = snapshot.counters.context_switches,
        deadlocks = snapshot.counters.deadlocks,
        "Simulation ended"
    );

    let json = serde_json::to_string_pretty(&snapshot).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}
