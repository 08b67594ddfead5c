use tokio::time::Instant;

use crate::error::AppResult;

use super::request::ApiRequest;
use super::transport::{Transport, to_reqwest_method};

/// One timed request: wall-clock latency, status code, and response size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed_ms: f64,
    pub status: u16,
    pub size_bytes: u64,
}

/// Performs exactly one request and measures it.
///
/// The clock starts immediately before the request is sent and stops once the body has been
/// read. Unsupported methods are rejected before the transport is touched.
///
/// # Errors
///
/// Returns an error for unsupported methods and for transport failures.
pub async fn execute_timed<T>(transport: &T, request: &ApiRequest) -> AppResult<Sample>
where
    T: Transport + Sync + ?Sized,
{
    to_reqwest_method(request.method)?;

    let start = Instant::now();
    let response = transport.send(request).await?;
    let elapsed = start.elapsed();

    Ok(Sample {
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        status: response.status,
        size_bytes: response_size(response.content_length.as_deref(), response.body.len()),
    })
}

/// Size from the `Content-Length` header when present, otherwise the body length.
///
/// A header that is present but not a number counts as zero bytes.
#[must_use]
pub fn response_size(content_length: Option<&str>, body_len: usize) -> u64 {
    match content_length {
        Some(value) => value.trim().parse::<u64>().unwrap_or_else(|_| {
            tracing::debug!("Unparseable Content-Length '{}', counting 0 bytes", value);
            0
        }),
        None => u64::try_from(body_len).unwrap_or(u64::MAX),
    }
}
