#![allow(missing_docs)]

use std::time::Duration;

use crate::error::{Pdf4meError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.pdf4me.com";

#[derive(Debug, Clone)]
pub struct Pdf4meConfig {
    pub api_key: String,
    pub base_url: String,
    pub poll_interval: Duration,
    pub max_wait: Duration,
    pub request_timeout: Duration,
    pub continue_on_fail: bool,
}

impl Default for Pdf4meConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(5 * 60),
            request_timeout: Duration::from_secs(120),
            continue_on_fail: false,
        }
    }
}

impl Pdf4meConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PDF4ME_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Pdf4meError::config("PDF4ME_API_KEY is not configured"))?;

        let defaults = Self::default();
        let secs = |name: &str, fallback: Duration| {
            std::env::var(name)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Ok(Self {
            api_key,
            base_url: std::env::var("PDF4ME_BASE_URL").unwrap_or(defaults.base_url),
            poll_interval: secs("PDF4ME_POLL_INTERVAL_SECS", defaults.poll_interval),
            max_wait: secs("PDF4ME_MAX_WAIT_SECS", defaults.max_wait),
            request_timeout: secs("PDF4ME_REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            continue_on_fail: std::env::var("PDF4ME_CONTINUE_ON_FAIL")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the overall deadline for polling a pending job.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval,
            max_wait: self.max_wait,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Pdf4meError::config("PDF4ME_API_KEY is not configured"));
        }
        if self.base_url.is_empty() {
            return Err(Pdf4meError::config("base URL must not be empty"));
        }
        if self.request_timeout.is_zero() {
            return Err(Pdf4meError::config("request timeout must be greater than zero"));
        }
        self.poll_policy().validate()
    }
}

/// Fixed-interval polling with an overall deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    /// Upper bound on poll requests before the deadline fires: `ceil(max_wait / interval)`.
    pub fn max_polls(&self) -> u32 {
        let interval = self.interval.as_nanos().max(1);
        let polls = self.max_wait.as_nanos().div_ceil(interval);
        u32::try_from(polls).unwrap_or(u32::MAX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Pdf4meError::config("poll interval must be greater than zero"));
        }
        if self.max_wait.is_zero() {
            return Err(Pdf4meError::config("max wait must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Pdf4meConfig::default().poll_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Pdf4meConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.continue_on_fail);
    }

    #[test]
    fn test_config_builders() {
        let config = Pdf4meConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_poll_interval(Duration::from_secs(2))
            .with_max_wait(Duration::from_secs(20))
            .with_continue_on_fail(true);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(
            config.poll_policy(),
            PollPolicy::new(Duration::from_secs(2), Duration::from_secs(20))
        );
        assert!(config.continue_on_fail);
    }

    #[test]
    fn test_config_validate_empty_key() {
        let config = Pdf4meConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_zero_interval() {
        let config = Pdf4meConfig::new("key").with_poll_interval(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_zero_request_timeout() {
        let config = Pdf4meConfig::new("key").with_request_timeout(Duration::ZERO);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Pdf4meError::Config(ref m) if m.contains("request timeout")));
    }

    #[test]
    fn test_config_validate_valid() {
        assert!(Pdf4meConfig::new("test-key").validate().is_ok());
    }

    #[test]
    fn test_max_polls_rounds_up() {
        let policy = PollPolicy::new(Duration::from_secs(3), Duration::from_secs(10));
        assert_eq!(policy.max_polls(), 4);

        let exact = PollPolicy::new(Duration::from_secs(5), Duration::from_secs(10));
        assert_eq!(exact.max_polls(), 2);
    }
}
