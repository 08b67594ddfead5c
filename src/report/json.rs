use std::path::Path;

use crate::bench::ResultsStore;
use crate::error::{AppError, AppResult, ReportError};

/// Writes every result, raw latencies included, as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when serialization or the file write fails.
pub async fn write_json(results: &ResultsStore, path: &Path) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(results)
        .map_err(|err| AppError::report(ReportError::SerializeResults { source: err }))?;
    tokio::fs::write(path, json).await.map_err(|err| {
        AppError::report(ReportError::WriteFile {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
