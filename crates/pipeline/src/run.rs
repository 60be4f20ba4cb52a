use crate::error::PipelineError;
use configuration::Config;
use core_types::Dataset;
use financials::FinancialSynthesizer;
use operations::OperationsSynthesizer;
use price_path::PricePathSimulator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Generates the full dataset from a `StdRng` seeded with `config.run.seed`.
///
/// Identical configuration yields an identical dataset.
pub fn generate_dataset(config: &Config) -> Result<Dataset, PipelineError> {
    let mut rng = StdRng::seed_from_u64(config.run.seed);
    generate_dataset_with(config, &mut rng)
}

/// Runs the three generators against a caller-supplied random source.
///
/// All parameters are validated before the first draw. The generators then
/// consume `rng` in a fixed order: price path, financials, operations. That
/// order is part of the reproducibility contract.
pub fn generate_dataset_with<R: Rng + ?Sized>(
    config: &Config,
    rng: &mut R,
) -> Result<Dataset, PipelineError> {
    let span = tracing::info_span!("run", run_id = %Uuid::new_v4(), seed = config.run.seed);
    let _enter = span.enter();

    let simulator = PricePathSimulator::new(config.price_path.clone())?;
    let financial_synthesizer = FinancialSynthesizer::new(config.financials.clone())?;
    let operations_synthesizer = OperationsSynthesizer::new(config.operations.clone())?;

    let run = &config.run;
    tracing::info!(start = %run.start_date, end = %run.end_date, "Starting generation run");

    let prices = simulator.simulate(run.start_date, run.end_date, rng)?;
    let financials = financial_synthesizer.synthesize(run.end_date, rng)?;
    let operations = operations_synthesizer.synthesize(&financials, rng)?;

    let dataset = Dataset {
        prices,
        financials,
        operations,
    };
    let summary = dataset.summary();
    tracing::info!(
        price_rows = summary.price_rows,
        quarter_rows = summary.quarter_rows,
        operations_rows = summary.operations_rows,
        "Generation run complete"
    );
    Ok(dataset)
}
