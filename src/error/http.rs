use thiserror::Error;

use crate::args::HttpMethod;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Unsupported method: {method}")]
    UnsupportedMethod { method: HttpMethod },
    #[error("Invalid bearer token: {source}")]
    InvalidToken {
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body from {url}: {source}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Listing at '{path}' is not valid JSON: {source}")]
    InvalidListing {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
