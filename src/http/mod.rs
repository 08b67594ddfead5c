//! HTTP transport and timed request execution.
mod executor;
mod request;
mod transport;


pub use executor::{Sample, execute_timed, response_size};
pub use request::ApiRequest;
pub use transport::{HttpTransport, RawResponse, Transport};
