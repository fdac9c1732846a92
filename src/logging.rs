use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::AppError;

/// Where log events go. Console output is always on; Loki shipping needs the
/// `loki` feature plus `LOKI_ENABLED=true` and `LOKI_URL`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            loki_enabled: false,
            loki_url: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            loki_enabled: std::env::var("LOKI_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            loki_url: std::env::var("LOKI_URL").ok(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.loki_enabled && self.loki_url.is_none() {
            return Err(AppError::Config(
                "LOKI_ENABLED is true but LOKI_URL is not set".to_string(),
            ));
        }
        Ok(())
    }
}

fn filter(config: &LoggingConfig) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| AppError::Config(format!("invalid log filter '{}': {}", config.log_level, e)))
}

/// Install the global subscriber. Events go to stderr so command output on
/// stdout stays clean.
pub fn init_logging(config: LoggingConfig) -> Result<(), AppError> {
    config.validate()?;

    #[cfg(feature = "loki")]
    {
        if let (true, Some(loki_url)) = (config.loki_enabled, config.loki_url.as_deref()) {
            return init_with_loki(&config, loki_url);
        }
    }

    tracing_subscriber::registry()
        .with(filter(&config)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| AppError::Config(e.to_string()))
}

#[cfg(feature = "loki")]
fn init_with_loki(config: &LoggingConfig, loki_url: &str) -> Result<(), AppError> {
    let url = url::Url::parse(loki_url)
        .map_err(|e| AppError::Config(format!("invalid LOKI_URL: {}", e)))?;

    let (loki_layer, task) = tracing_loki::builder()
        .label("service", env!("CARGO_PKG_NAME"))
        .and_then(|builder| builder.build_url(url))
        .map_err(|e| AppError::Config(e.to_string()))?;

    // Ships batches in the background
    tokio::spawn(task);

    tracing_subscriber::registry()
        .with(filter(config)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(loki_layer)
        .try_init()
        .map_err(|e| AppError::Config(e.to_string()))?;

    tracing::info!("Loki logging initialized at {}", loki_url);
    Ok(())
}
