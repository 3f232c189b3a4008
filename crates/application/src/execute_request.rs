//! Sends one request after checking that it can be sent at all.

use std::sync::Arc;

use postprobe_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

use crate::ports::{HttpClient, HttpClientError};

/// What [`ExecuteRequest::execute`] yields.
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Reasons a request produced no response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteRequestError {
    /// The URL is blank.
    #[error("URL is required")]
    EmptyUrl,

    /// The URL names no HTTP(S) endpoint.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

/// Gatekeeper in front of an [`HttpClient`].
///
/// ```ignore
/// let send = ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let post = RequestSpec::new(HttpMethod::Get, "https://jsonplaceholder.typicode.com/posts/2");
/// let response = send.execute(&post).await?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Wraps `client`.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Sends `request` unless its URL is blank or not http(s).
    ///
    /// # Errors
    ///
    /// `EmptyUrl` or `InvalidUrl` before anything is sent, `HttpError` when
    /// the client fails.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        check_url(&request.url)?;
        Ok(self.client.execute(request).await?)
    }
}

fn check_url(url: &str) -> Result<(), ExecuteRequestError> {
    let url = url.trim();
    if url.is_empty() {
        Err(ExecuteRequestError::EmptyUrl)
    } else if ["http://", "https://"].iter().any(|scheme| url.starts_with(scheme)) {
        Ok(())
    } else {
        Err(ExecuteRequestError::InvalidUrl(format!(
            "'{url}' must start with http:// or https://"
        )))
    }
}
