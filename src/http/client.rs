// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use serde_json::Value;

use super::request::Request;
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};
use crate::network::{
    InterceptorChain, InterceptorRegistry, RequestErrorHook, RequestHook, ResponseErrorHook,
    ResponseHook,
};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Treat non-2xx responses as errors, routing them to response-error
    /// interceptors
    pub error_for_status: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "accept",
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
            error_for_status: true,
        }
    }
}

/// HTTP client running an interceptor chain around every request
///
/// Clones share one [`InterceptorChain`], so interceptors registered through
/// any clone apply to all of them.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    interceptors: Arc<InterceptorChain>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            interceptors: Arc::new(InterceptorChain::new()),
        })
    }

    /// Get the shared interceptor chain
    pub fn interceptors(&self) -> &Arc<InterceptorChain> {
        &self.interceptors
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Execute a request through the interceptor chain
    ///
    /// A rejection on the request side skips transmission and continues
    /// through the response-error interceptors, so callers always observe
    /// the outcome the chain settled on.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let outcome = match self.interceptors.process_request(Ok(request)).await {
            Ok(request) => self.send(request).await,
            Err(error) => {
                tracing::debug!(error = %error, "Request rejected by interceptor");
                Err(error)
            }
        };
        self.interceptors.process_response(outcome).await
    }

    async fn send(&self, request: Request) -> Result<Response> {
        let start = Instant::now();
        let Request {
            method,
            url,
            headers,
            body,
            timeout,
            ..
        } = request;

        tracing::debug!(method = %method, url = %url, "Sending HTTP request");

        let mut builder = self.client.request(method, url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let redirected = response.url() != &url;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(body) => body,
            // Keep the status so a truncated 401 still reaches logout
            Err(e) if self.config.error_for_status && !status.is_success() => {
                tracing::debug!(status = %status, error = %e, "Failed to read error body");
                Bytes::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            status = %status,
            url = %final_url,
            time_ms = response_time,
            "Received HTTP response"
        );

        let response = Response::new(status, headers, body, final_url, redirected, response_time);
        if self.config.error_for_status && !status.is_success() {
            return Err(Error::status(response));
        }
        Ok(response)
    }

    /// Create a request builder
    pub fn request(&self, method: Method, url: impl AsRef<str>) -> Result<RequestBuilder> {
        Ok(RequestBuilder {
            client: self.clone(),
            request: Request::new(method, url)?,
        })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

impl InterceptorRegistry for HttpClient {
    fn use_request(&self, on_fulfilled: RequestHook, on_rejected: RequestErrorHook) {
        self.interceptors.use_request(on_fulfilled, on_rejected);
    }

    fn use_response(&self, on_fulfilled: ResponseHook, on_rejected: ResponseErrorHook) {
        self.interceptors.use_response(on_fulfilled, on_rejected);
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("interceptors", &self.interceptors)
            .finish()
    }
}

/// Builder for executing requests with the client
pub struct RequestBuilder {
    client: HttpClient,
    request: Request,
}

impl RequestBuilder {
    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Set JSON body
    pub fn json<T: serde::Serialize>(mut self, data: &T) -> Result<Self> {
        self.request = self.request.json(data)?;
        Ok(self)
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request = self.request.timeout(timeout);
        self
    }

    /// Attach a caller-defined extension value
    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request = self.request.extension(key, value);
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<Response> {
        self.client.execute(self.request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HookSet;
    use parking_lot::Mutex;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(client.config().error_for_status);
    }

    #[test]
    fn test_invalid_proxy() {
        let config = HttpClientConfig {
            proxy: Some("::not a proxy::".to_string()),
            ..HttpClientConfig::default()
        };
        assert!(matches!(HttpClient::with_config(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_clones_share_interceptors() {
        let client = HttpClient::new().unwrap();
        let other = client.clone();
        let hooks = HookSet::new();

        hooks.attach_to(&other);

        assert_eq!(client.interceptors().request_len(), 1);
        assert_eq!(client.interceptors().response_len(), 1);
    }

    #[tokio::test]
    async fn test_request_rejection_skips_network() {
        let client = HttpClient::new().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let reject = HookSet::new().on_request(|_| Err(Error::other("offline")));
        let record_seen = seen.clone();
        let record = HookSet::new().on_response_error(move |error| {
            record_seen.lock().push(error.to_string());
            Err(error)
        });
        reject.attach_to(&client);
        record.attach_to(&client);

        // Port 9 is discard; nothing should ever be sent there
        let err = client.get("http://127.0.0.1:9/never").await.unwrap_err();

        assert_eq!(err.to_string(), "offline");
        assert_eq!(*seen.lock(), vec!["offline".to_string()]);
    }
}
