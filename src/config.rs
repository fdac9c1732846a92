use std::time::Duration;

use crate::errors::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the portfolio REST API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub id_token: Option<String>,
    pub user_id: String,
    pub user_email: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout_secs: u64 = std::env::var("API_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
            id_token: std::env::var("SNF_ID_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            user_id: std::env::var("SNF_USER_ID").unwrap_or_else(|_| "local-user".to_string()),
            user_email: std::env::var("SNF_USER_EMAIL").ok(),
        }
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            id_token: None,
            user_id: "local-user".to_string(),
            user_email: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| AppError::Config(format!("API_URL '{}' is invalid: {}", self.api_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "API_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config("API_TIMEOUT_SECS must be greater than zero".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }
}
