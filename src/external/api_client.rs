use std::sync::Arc;

use http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::errors::AppError;
use crate::session::IdentityProvider;

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Outbound client for the portfolio REST API.
///
/// Every call asks the identity provider for a fresh token; nothing is cached
/// between calls. Without a session the request goes out unauthenticated and
/// the server decides.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    identity: Arc<dyn IdentityProvider>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, identity: Arc<dyn IdentityProvider>) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            identity,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self.send::<()>(Method::DELETE, path, None).await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Perform one call and decode the body. Empty bodies decode as `null`.
    pub async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AppError> {
        let response = self.send(method, path, body).await?;
        let text = Self::check_status(response).await?;

        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| {
            AppError::transport(
                None,
                format!(
                    "Failed to parse response: {} - {}",
                    e,
                    text.chars().take(200).collect::<String>()
                ),
            )
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[ApiClient] {} {}", method, path);

        let mut request = self.client.request(method, &url);
        if let Some(token) = self.identity.id_token().await? {
            let header = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| AppError::Identity(format!("Invalid token format: {}", e)))?;
            request = request.header(AUTHORIZATION, header);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            warn!("[ApiClient] request to {} failed: {}", path, e);
            AppError::transport(None, format!("Request failed: {}", e))
        })
    }

    /// Read the body, turning a non-2xx status into a `Transport` error.
    async fn check_status(response: reqwest::Response) -> Result<String, AppError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport(Some(status), format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }
        Err(AppError::transport(Some(status), error_message(status, &body)))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        if let Some(msg) = err.message.or(err.error).filter(|m| !m.trim().is_empty()) {
            return msg;
        }
    }
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {}", status);
    }
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"price must be positive","error":"Bad Request"}"#,
        );
        assert_eq!(msg, "price must be positive");

        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"error":"Bad Request"}"#);
        assert_eq!(msg, "Bad Request");
    }

    #[test]
    fn test_error_message_falls_back_to_body_then_status() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, "Not found"), "Not found");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "HTTP 404 Not Found");

        let long = "x".repeat(500);
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, &long).len(), 200);
    }
}
