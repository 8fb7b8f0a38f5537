//! Configuration surface for the queue and its sinks.
//!
//! Mirrors the load-then-validate convention used across this lineage's
//! connector and engine configs: construct a default, override from the
//! environment, then call [`QueueConfig::validate`] before wiring anything up.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{QueueError, QueueResult};

/// Top level configuration for an [`crate::queue::ExecutableQueue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Poll interval shared by the Executor's idle sleep and the Delay Promoter's tick.
    #[serde(with = "duration_ms")]
    pub poll_interval: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl QueueConfig {
    /// Validate invariants that downstream code relies on.
    pub fn validate(&self) -> QueueResult<()> {
        if self.poll_interval.is_zero() {
            return Err(QueueError::InvalidConfig(
                "poll_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration, overriding defaults from `EXECQUEUE_*` environment variables.
    pub fn from_env() -> QueueResult<Self> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("EXECQUEUE_POLL_INTERVAL_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.poll_interval = Duration::from_millis(ms);
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Configuration for [`crate::sink::HttpResultSink`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSinkConfig {
    pub url: String,
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
}

impl HttpSinkConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration for [`crate::sink::JwtResultSink`].
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtSinkConfig {
    pub url: String,
    pub issuer: String,
    /// HS256 signing secret. Kept out of `Debug` output deliberately.
    pub secret: String,
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
}

impl std::fmt::Debug for JwtSinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSinkConfig")
            .field("url", &self.url)
            .field("issuer", &self.issuer)
            .field("secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl JwtSinkConfig {
    pub fn new(url: impl Into<String>, issuer: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            issuer: issuer.into(),
            secret: secret.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(QueueConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = QueueConfig {
            poll_interval: Duration::ZERO,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn jwt_config_debug_redacts_secret() {
        let config = JwtSinkConfig::new("https://example.test/hook", "execqueue", "top-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
    }
}
