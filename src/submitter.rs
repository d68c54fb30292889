use crate::params::{flatten_parameter_map, ParameterSet};
use crate::query::parse_query_string;
use crate::Result;
use async_trait::async_trait;

/// Trait for outbound form submission that can be mocked for testing.
///
/// Request handlers that relay parameters server-side should depend on this
/// trait rather than on [`FormPostClient`](crate::FormPostClient) directly.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockFormSubmitter`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    /// POST `params` as a form to `address` and return the response body.
    async fn submit_form_post(&self, address: &str, params: &ParameterSet) -> Result<String>;

    /// Relay a raw query string or form body to `address`.
    ///
    /// The input is parsed, reduced to the first value of each key and
    /// POSTed as a form.
    async fn relay_query(&self, address: &str, raw_query: &str) -> Result<String> {
        let params = flatten_parameter_map(&parse_query_string(raw_query))?;
        log::debug!("Relaying {} query parameter(s) to {address}", params.len());
        self.submit_form_post(address, &params).await
    }
}
