use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};

use crate::args::{DEFAULT_USER_AGENT, HttpMethod};
use crate::error::{AppError, AppResult, HttpError};

use super::request::ApiRequest;

/// Response as seen by the benchmark: status, raw `Content-Length` header, and body bytes.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub content_length: Option<String>,
    pub body: Vec<u8>,
}

/// Sends a single request and returns the fully read response.
///
/// Implementations must not retry; transport failures are returned as errors.
#[async_trait]
pub trait Transport {
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or the body cannot be read.
    async fn send(&self, request: &ApiRequest) -> AppResult<RawResponse>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a client that sends the bearer token and JSON content type on every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is not a valid header value or the client cannot be built.
    pub fn new(
        base_url: &str,
        token: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|err| AppError::http(HttpError::InvalidToken { source: err }))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> AppResult<RawResponse> {
        let method = to_reqwest_method(request.method)?;
        let url = self.url_for(&request.path);

        let mut builder = self.client.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            AppError::http(HttpError::Transport {
                method: request.method,
                url: url.clone(),
                source: err,
            })
        })?;

        let status = response.status().as_u16();
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let body = response
            .bytes()
            .await
            .map_err(|err| AppError::http(HttpError::ReadBody { url, source: err }))?;

        Ok(RawResponse {
            status,
            content_length,
            body: body.to_vec(),
        })
    }
}

pub(super) fn to_reqwest_method(method: HttpMethod) -> AppResult<Method> {
    match method {
        HttpMethod::Get => Ok(Method::GET),
        HttpMethod::Post => Ok(Method::POST),
        HttpMethod::Patch | HttpMethod::Put | HttpMethod::Delete => {
            Err(AppError::http(HttpError::UnsupportedMethod { method }))
        }
    }
}
