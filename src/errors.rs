use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Transport {
        status: Option<StatusCode>,
        message: String,
    },
    #[error("{0}")]
    Validation(String),
    #[error("Identity provider error: {0}")]
    Identity(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn transport(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        AppError::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of a failed call, `None` for network failures and local errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        AppError::Transport {
            status: value.status(),
            message: value.to_string(),
        }
    }
}
