use std::time::Duration;

use crate::args::PositiveUsize;
use crate::error::AppResult;
use crate::http::{Sample, Transport, execute_timed};
use crate::plan::TestCase;

use super::results::ResultsStore;
use super::stats::summarize;

/// Runs each test case a fixed number of times and keeps the aggregated results.
pub struct BenchmarkRunner<'transport, T: ?Sized> {
    transport: &'transport T,
    runs: PositiveUsize,
    delay: Duration,
    results: ResultsStore,
}

impl<'transport, T> BenchmarkRunner<'transport, T>
where
    T: Transport + Sync + ?Sized,
{
    #[must_use]
    pub fn new(transport: &'transport T, runs: PositiveUsize, delay: Duration) -> Self {
        Self {
            transport,
            runs,
            delay,
            results: ResultsStore::new(),
        }
    }

    /// Executes `case` `runs` times in sequence, pausing `delay` after every call, then
    /// stores the summary under the case name.
    ///
    /// # Errors
    ///
    /// Returns the first executor error; samples gathered for this case so far are discarded.
    pub async fn run_case(&mut self, case: &TestCase) -> AppResult<()> {
        tracing::info!("Running test: {}", case.name);

        let mut samples: Vec<Sample> = Vec::with_capacity(self.runs.get());
        for _ in 0..self.runs.get() {
            samples.push(execute_timed(self.transport, &case.request).await?);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        if let Some(result) = summarize(&samples) {
            tracing::info!(
                "Average time: {:.2} ms, Success rate: {:.2}%",
                result.avg_time,
                result.success_rate
            );
            if self.results.insert(case.name.clone(), result).is_some() {
                tracing::debug!("Replaced earlier result for '{}'", case.name);
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn results(&self) -> &ResultsStore {
        &self.results
    }

    #[must_use]
    pub fn into_results(self) -> ResultsStore {
        self.results
    }
}
