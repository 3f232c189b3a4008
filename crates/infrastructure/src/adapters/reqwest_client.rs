//! `HttpClient` backed by reqwest.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::time::{Duration, Instant};

use postprobe_application::ports::{HttpClient, HttpClientError};
use postprobe_domain::{
    request::{HttpMethod, RequestBody, RequestSpec},
    response::ResponseSpec,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use tracing::Instrument;

const MAX_REDIRECTS: usize = 10;

/// Sends [`RequestSpec`]s over a shared reqwest connection pool.
///
/// There is no client-wide timeout; a request's own `timeout_ms` applies
/// when set. Redirects are followed up to ten hops.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Builds the underlying client.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::Other` if the TLS backend fails to initialize.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("postprobe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(error_chain(&e)))?;

        Ok(Self { client })
    }

    /// Turns a `RequestSpec` into a ready-to-send builder without touching the network.
    fn prepare(&self, request: &RequestSpec) -> Result<RequestBuilder, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
        let mut builder = self.client.request(to_method(request.method), url);

        if let Some(ms) = request.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        if request.body.is_empty() {
            return Ok(builder);
        }
        if let Some(media_type) = request.body.content_type()
            && !request.headers.contains(CONTENT_TYPE.as_str())
        {
            builder = builder.header(CONTENT_TYPE, media_type);
        }
        match &request.body {
            RequestBody::Empty => Ok(builder),
            RequestBody::Json(text) => {
                serde_json::from_str::<serde_json::Value>(text)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                Ok(builder.body(text.clone()))
            }
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        let prepared = self.prepare(request);
        let timeout_ms = request.timeout_ms;
        let span = tracing::debug_span!(
            "http",
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
        );

        Box::pin(
            async move {
                let builder = prepared?;
                // Timed from send until the body is fully read.
                let started = Instant::now();
                let response = builder
                    .send()
                    .await
                    .map_err(|e| classify(&e, timeout_ms))?;
                let captured = capture(response, started).await?;

                tracing::debug!(
                    status = captured.status,
                    elapsed_ms = u64::try_from(captured.duration.as_millis()).unwrap_or(u64::MAX),
                    "response received"
                );
                Ok(captured)
            }
            .instrument(span),
        )
    }
}

const fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

async fn capture(response: Response, started: Instant) -> Result<ResponseSpec, HttpClientError> {
    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    let body = response
        .bytes()
        .await
        .map_err(|e| HttpClientError::BodyRead(error_chain(&e)))?;

    Ok(ResponseSpec::new(status, headers, body.to_vec(), started.elapsed()))
}

/// Flattens a header map, joining repeated fields with `", "`.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<binary>");
        collected
            .entry(name.as_str().to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}

fn causes<'e>(
    error: &'e (dyn StdError + 'static),
) -> impl Iterator<Item = &'e (dyn StdError + 'static)> {
    std::iter::successors(Some(error), |&e| e.source())
}

/// Every message in the source chain, outermost first, joined with `": "`.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut chain = String::new();
    for cause in causes(error) {
        let message = cause.to_string();
        if chain.contains(&message) {
            continue;
        }
        if !chain.is_empty() {
            chain.push_str(": ");
        }
        chain.push_str(&message);
    }
    chain
}

fn classify(error: &reqwest::Error, timeout_ms: Option<u64>) -> HttpClientError {
    if error.is_timeout() {
        return HttpClientError::Timeout {
            timeout_ms: timeout_ms.unwrap_or_default(),
        };
    }
    if error.is_redirect() {
        return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
    }

    let chain = error_chain(error);
    if !error.is_connect() {
        return HttpClientError::Other(chain);
    }

    let refused = causes(error).any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io| io.kind() == io::ErrorKind::ConnectionRefused)
    });
    connect_failure(error.url(), chain, refused)
}

/// Sorts a failed connect into DNS, refused or generic from its cause chain.
fn connect_failure(url: Option<&Url>, chain: String, refused: bool) -> HttpClientError {
    const DNS_MARKERS: [&str; 5] = [
        "dns error",
        "failed to lookup",
        "name or service not known",
        "no such host",
        "resolve",
    ];

    let host = url
        .and_then(Url::host_str)
        .unwrap_or("unknown")
        .to_string();
    let lower = chain.to_lowercase();

    if refused || lower.contains("connection refused") {
        HttpClientError::ConnectionRefused {
            host,
            port: url.and_then(Url::port_or_known_default).unwrap_or(80),
        }
    } else if DNS_MARKERS.iter().any(|marker| lower.contains(marker)) {
        HttpClientError::DnsError {
            host,
            message: chain,
        }
    } else {
        HttpClientError::ConnectionFailed(chain)
    }
}
