use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bench::{BenchmarkRunner, ResultsStore};
use crate::config::RunSettings;
use crate::error::AppResult;
use crate::http::{HttpTransport, Transport};
use crate::plan::{build_plan, collect_samples};
use crate::report::write_reports;
use crate::shutdown::ShutdownReceiver;

/// How a run ended. Reports are written for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Interrupted,
    Failed,
}

#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub results: ResultsStore,
}

/// Runs the whole benchmark against the live API and writes the reports.
///
/// # Errors
///
/// Returns an error only when the HTTP client cannot be built. Failures during the run are
/// logged and turned into [`RunOutcome::Failed`].
pub async fn run(
    settings: &RunSettings,
    mut shutdown_rx: ShutdownReceiver,
) -> AppResult<RunOutcome> {
    let transport = HttpTransport::new(
        &settings.base_url,
        &settings.token,
        settings.request_timeout,
        settings.connect_timeout,
    )?;

    let report = run_benchmark(&transport, settings, &mut shutdown_rx).await;
    write_reports(&report.results, &settings.output_dir, settings.chart).await;
    Ok(report.outcome)
}

/// Executes the plan until it finishes, fails, or shutdown is signalled, keeping whatever
/// results were gathered.
pub async fn run_benchmark<T>(
    transport: &T,
    settings: &RunSettings,
    shutdown_rx: &mut ShutdownReceiver,
) -> RunReport
where
    T: Transport + Sync + ?Sized,
{
    let mut rng = settings
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let mut runner = BenchmarkRunner::new(transport, settings.runs, settings.delay);

    let outcome = tokio::select! {
        result = execute(&mut runner, transport, settings, &mut rng) => match result {
            Ok(()) => RunOutcome::Completed,
            Err(err) => {
                tracing::error!("Error during testing: {}", err);
                RunOutcome::Failed
            }
        },
        _ = shutdown_rx.recv() => {
            tracing::warn!("Test interrupted by user");
            RunOutcome::Interrupted
        }
    };

    RunReport {
        outcome,
        results: runner.into_results(),
    }
}

async fn execute<T>(
    runner: &mut BenchmarkRunner<'_, T>,
    transport: &T,
    settings: &RunSettings,
    rng: &mut StdRng,
) -> AppResult<()>
where
    T: Transport + Sync + ?Sized,
{
    tracing::info!("Starting performance tests against {}", settings.base_url);

    let samples = collect_samples(transport, settings.sample_size, rng).await?;
    let plan = build_plan(&samples, &settings.plan, rng);
    tracing::info!(
        "Running {} test cases with {} runs each",
        plan.len(),
        settings.runs.get()
    );

    for case in &plan {
        runner.run_case(case).await?;
    }

    tracing::info!("All tests completed");
    Ok(())
}
