use crate::config::PostConfig;
use crate::headers::add_form_post_headers;
use crate::params::ParameterSet;
use crate::query::serialize_to_query_string;
use crate::submitter::FormSubmitter;
use crate::{RelayError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};

/// Client that sends form-encoded POST requests.
///
/// The client holds no state besides the HTTP implementation it was given
/// and its [`PostConfig`]. Each call is a single attempt: failures are
/// returned as [`RelayError`] and never retried.
///
/// # Examples
///
/// ```rust,no_run
/// use form_relay::{FormPostClient, ParameterSet, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let client = FormPostClient::new(Box::new(http_client));
///
///     let params = ParameterSet::from_pairs([("lti_version", "LTI-1p0")]);
///     let body = client
///         .submit_form_post("https://tool.example.com/launch", &params)
///         .await?;
///     println!("{body}");
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FormPostClient {
    client: Box<dyn HttpClient>,
    config: PostConfig,
}

impl FormPostClient {
    /// Create a new [`FormPostClient`] with the default [`PostConfig`].
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self::with_config(client, PostConfig::default())
    }

    pub fn with_config(client: Box<dyn HttpClient>, config: PostConfig) -> Self {
        Self { client, config }
    }

    /// POST `params` as a form to `address` and return the response body.
    ///
    /// The body is encoded as `application/x-www-form-urlencoded` in the
    /// parameter set's order. The whole exchange, including reading the
    /// response, is bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// - [`RelayError::InvalidUrl`] if `address` is not an http(s) URL
    /// - [`RelayError::Http`] if the request could not be sent
    /// - [`RelayError::Status`] if the response status is not 2xx
    /// - [`RelayError::Timeout`] if the timeout elapsed first
    /// - [`RelayError::Body`] if the response body could not be read
    pub async fn submit_form_post(&self, address: &str, params: &ParameterSet) -> Result<String> {
        let result = self.post(address, params).await;

        if let Err(e) = &result {
            log::warn!("Form POST to {address} failed: {e}");
        }

        result
    }

    async fn post(&self, address: &str, params: &ParameterSet) -> Result<String> {
        let url = parse_address(address)?;

        let mut request = Request::new(Method::Post, url);
        add_form_post_headers(&mut request, &self.config.user_agent);
        request.set_body(serialize_to_query_string(params));

        log::debug!(
            "POSTing {} form parameter(s) to {address} (timeout {:?})",
            params.len(),
            self.config.timeout
        );

        let timeout = self.config.timeout;
        match tokio::time::timeout(timeout, self.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout { after: timeout }),
        }
    }

    async fn send(&self, request: Request) -> Result<String> {
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        let status = response.status();
        log::debug!("Form POST response status: {status}");

        if !status.is_success() {
            let body = response.body_string().await.unwrap_or_default();
            return Err(RelayError::Status {
                status: status.into(),
                body,
            });
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| RelayError::Body(e.to_string()))?;
        log::trace!("Form POST response body: {} bytes", body.len());

        Ok(body)
    }
}

#[async_trait]
impl FormSubmitter for FormPostClient {
    async fn submit_form_post(&self, address: &str, params: &ParameterSet) -> Result<String> {
        FormPostClient::submit_form_post(self, address, params).await
    }
}

/// POST `params` to `address` with a freshly created HTTP client.
///
/// The client is configured from [`PostConfig::from_env`] and dropped when
/// the call returns, so no connection outlives the request.
///
/// # Examples
///
/// ```rust,no_run
/// # use form_relay::{submit_form_post, ParameterSet};
/// # tokio_test::block_on(async {
/// let params = ParameterSet::from_pairs([("oauth_consumer_key", "portal")]);
/// let body = submit_form_post("https://tool.example.com/launch", &params).await?;
/// println!("{body}");
/// # Ok::<(), form_relay::RelayError>(())
/// # });
/// ```
pub async fn submit_form_post(address: &str, params: &ParameterSet) -> Result<String> {
    submit_form_post_with_config(address, params, PostConfig::from_env()).await
}

/// Same as [`submit_form_post`] with an explicit [`PostConfig`].
pub async fn submit_form_post_with_config(
    address: &str,
    params: &ParameterSet,
    config: PostConfig,
) -> Result<String> {
    let http_client = http_client::native::NativeClient::new();
    let client = FormPostClient::with_config(Box::new(http_client), config);
    client.submit_form_post(address, params).await
}

/// Blocking variant of [`submit_form_post`].
///
/// Runs the request to completion on the calling thread using a
/// single-threaded runtime built for this call. Must not be called from
/// within an async runtime.
pub fn submit_form_post_blocking(address: &str, params: &ParameterSet) -> Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(submit_form_post(address, params))
}

/// Parse a destination address, accepting only http and https URLs.
pub fn parse_address(address: &str) -> Result<Url> {
    let url = address
        .trim()
        .parse::<Url>()
        .map_err(|e| RelayError::InvalidUrl {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RelayError::InvalidUrl {
            address: address.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
