//! Price the illustrative Heston scenario with both exercise styles.
//!
//! ```text
//! RUST_LOG=debug HESTONMC_SEED=42 cargo run -p hestonmc --example illustrative_scenario
//! ```
//!
//! Without `HESTONMC_SEED` the paths are seeded from OS entropy and every
//! run prints slightly different prices.

use hestonmc::core::Error;
use hestonmc::instruments::{ExerciseStyle, OptionType};
use hestonmc::pricingengines::{McConfig, McHestonEngine};
use hestonmc::processes::SimulationParameters;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut config = McConfig::default();
    if let Ok(raw) = std::env::var("HESTONMC_SEED") {
        let seed = raw
            .parse()
            .map_err(|e| Error::InvalidParameters(format!("HESTONMC_SEED={raw}: {e}")))?;
        config = config.with_seed(seed);
    }

    let params = SimulationParameters::illustrative();
    tracing::info!(
        paths = params.paths,
        steps = params.steps,
        seed = ?config.seed,
        "pricing illustrative scenario"
    );
    let engine = McHestonEngine::with_config(params, config)?;

    for style in [ExerciseStyle::European, ExerciseStyle::AmericanApprox] {
        let call = engine.price(OptionType::Call, style);
        println!(
            "{style} Call Option Price: {:.4} (± {:.4})",
            call.npv,
            call.error_estimate.unwrap_or(0.0)
        );
    }
    Ok(())
}
