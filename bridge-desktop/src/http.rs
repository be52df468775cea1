//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{
        HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart,
        TransportRetryPolicy,
    },
};
use core_async::time::{sleep, Duration};
use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("plattea-core/", env!("CARGO_PKG_VERSION"));

/// Reqwest-based HTTP client implementation
///
/// - Connection pooling via reqwest
/// - rustls TLS
/// - `multipart/form-data` bodies for file uploads
/// - Exponential backoff, only when asked for through `execute_with_retry`
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }

    fn convert_form(form: &MultipartForm) -> Result<reqwest::multipart::Form> {
        let mut converted = reqwest::multipart::Form::new();

        for part in &form.parts {
            converted = match part {
                MultipartPart::Text { name, value } => converted.text(name.clone(), value.clone()),
                MultipartPart::File {
                    name,
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let file_part = reqwest::multipart::Part::bytes(bytes.to_vec())
                        .file_name(file_name.clone())
                        .mime_str(mime_type)
                        .map_err(|e| {
                            BridgeError::OperationFailed(format!(
                                "Invalid MIME type '{}': {}",
                                mime_type, e
                            ))
                        })?;
                    converted.part(name.clone(), file_part)
                }
            };
        }

        Ok(converted)
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: &HttpRequest) -> Result<reqwest::RequestBuilder> {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        if let Some(form) = &request.multipart {
            req = req.multipart(Self::convert_form(form)?);
        } else if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        Ok(req)
    }

    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let response = self.build_request(request)?.send().await.map_err(|e| {
            if e.is_timeout() {
                BridgeError::OperationFailed("Request timed out".to_string())
            } else if e.is_connect() {
                BridgeError::OperationFailed(format!("Connection failed: {}", e))
            } else {
                BridgeError::OperationFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| BridgeError::OperationFailed(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn backoff(policy: &TransportRetryPolicy, attempt: u32) -> Duration {
        if policy.use_exponential_backoff {
            let factor = 2u32
                .checked_pow(attempt.saturating_sub(1))
                .unwrap_or(u32::MAX);
            policy.base_delay.saturating_mul(factor).min(policy.max_delay)
        } else {
            policy.base_delay
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, method = ?request.method, "Executing HTTP request");
        self.send_once(&request).await
    }

    async fn execute_with_retry(
        &self,
        request: HttpRequest,
        policy: TransportRetryPolicy,
    ) -> Result<HttpResponse> {
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                attempt = attempt,
                max_attempts = max_attempts,
                url = %request.url,
                "Executing HTTP request"
            );

            let outcome = self.send_once(&request).await;
            let retryable = match &outcome {
                Ok(response) => response.status == 429 || response.is_server_error(),
                Err(_) => true,
            };

            if !retryable || attempt >= max_attempts {
                return outcome;
            }

            match &outcome {
                Ok(response) => warn!(
                    status = response.status,
                    attempt = attempt,
                    "HTTP request failed with retryable status"
                ),
                Err(error) => warn!(error = %error, attempt = attempt, "HTTP request failed"),
            }

            let delay = Self::backoff(&policy, attempt);
            debug!(delay_ms = delay.as_millis() as u64, "Retrying after delay");
            sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_http_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Get),
            reqwest::Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Delete),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = TransportRetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(300),
            use_exponential_backoff: true,
        };

        assert_eq!(ReqwestHttpClient::backoff(&policy, 1), Duration::from_millis(100));
        assert_eq!(ReqwestHttpClient::backoff(&policy, 2), Duration::from_millis(200));
        assert_eq!(ReqwestHttpClient::backoff(&policy, 5), Duration::from_millis(300));
    }

    #[test]
    fn test_backoff_saturates_on_late_attempts() {
        let policy = TransportRetryPolicy {
            max_attempts: 64,
            ..TransportRetryPolicy::default()
        };

        assert_eq!(ReqwestHttpClient::backoff(&policy, 34), policy.max_delay);
        assert_eq!(ReqwestHttpClient::backoff(&policy, u32::MAX), policy.max_delay);
    }

    #[test]
    fn test_fixed_backoff() {
        let policy = TransportRetryPolicy {
            use_exponential_backoff: false,
            ..TransportRetryPolicy::default()
        };

        assert_eq!(ReqwestHttpClient::backoff(&policy, 4), policy.base_delay);
    }

    #[test]
    fn test_invalid_mime_type_is_rejected() {
        let form = MultipartForm::new().file("file", "clip", "not a mime", Bytes::new());
        assert!(ReqwestHttpClient::convert_form(&form).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let client = ReqwestHttpClient::with_timeout(Duration::from_millis(500)).unwrap();
        let request = HttpRequest::new(HttpMethod::Get, "http://127.0.0.1:9/unreachable");

        assert!(client.execute(request).await.is_err());
    }
}
