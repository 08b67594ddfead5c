use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, AppResult, HttpError};
use crate::http::{ApiRequest, RawResponse, Transport};

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

pub(crate) fn ok_response(body: &[u8]) -> RawResponse {
    RawResponse {
        status: 200,
        content_length: None,
        body: body.to_vec(),
    }
}

pub(crate) fn status_response(status: u16) -> RawResponse {
    RawResponse {
        status,
        content_length: None,
        body: Vec::new(),
    }
}

pub(crate) fn json_response(value: &serde_json::Value) -> AppResult<RawResponse> {
    Ok(ok_response(&serde_json::to_vec(value)?))
}

/// Replays canned responses per path and records every request it sees.
///
/// Paths without a queued response answer with `fallback`. A path registered with
/// [`ScriptedTransport::fail_on`] returns a transport-style error.
pub(crate) struct ScriptedTransport {
    responses: Mutex<Vec<(String, VecDeque<RawResponse>)>>,
    fallback: RawResponse,
    latency: Duration,
    fail_path: Option<String>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(fallback: RawResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback,
            latency: Duration::ZERO,
            fail_path: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn fail_on(mut self, path: &str) -> Self {
        self.fail_path = Some(path.to_owned());
        self
    }

    pub(crate) fn respond(self, path: &str, response: RawResponse) -> Self {
        {
            let mut responses = lock(&self.responses);
            if let Some((_, queue)) = responses.iter_mut().find(|(p, _)| p == path) {
                queue.push_back(response);
            } else {
                responses.push((path.to_owned(), VecDeque::from([response])));
            }
        }
        self
    }

    pub(crate) fn seen(&self) -> Vec<ApiRequest> {
        lock(&self.seen).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> AppResult<RawResponse> {
        lock(&self.seen).push(request.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail_path.as_deref() == Some(request.path.as_str()) {
            return Err(AppError::http(HttpError::TestExpectationValue {
                message: "scripted transport failure",
                value: request.path.clone(),
            }));
        }
        let queued = lock(&self.responses)
            .iter_mut()
            .find(|(path, _)| *path == request.path)
            .and_then(|(_, queue)| queue.pop_front());
        Ok(queued.unwrap_or_else(|| self.fallback.clone()))
    }
}
