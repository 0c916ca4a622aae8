use anyhow::{Context, Result};
use supply_flow_planner::{config::Config, model::ObjectivePolicy, run::OptimizationRun, telemetry};
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;

    info!("planning flows for transportation cost");
    let outcome = OptimizationRun::from_config(&cfg, ObjectivePolicy::TransportCost)?
        .execute()
        .context("transport-cost plan failed")?;
    println!("{}\n", outcome.report);

    info!("planning flows for transportation cost, then road construction cost");
    let outcome = OptimizationRun::from_config(&cfg, ObjectivePolicy::TransportThenRoads)?
        .execute()
        .context("road-cost plan failed")?;
    println!("{}", outcome.report);

    Ok(())
}
