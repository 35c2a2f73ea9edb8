use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CAPTION_SERVICE_URL: &str = "http://localhost:8000/caption";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 << 20;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: String,
    pub caption_service_url: String,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    pub allowed_origin: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            caption_service_url: DEFAULT_CAPTION_SERVICE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl RelayConfig {
    /// Reads overrides from the environment. Call `dotenvy::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let caption_service_url =
            env::var("CAPTION_SERVICE_URL").unwrap_or(defaults.caption_service_url);
        let allowed_origin = env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin);

        let request_timeout = match positive_var("CAPTION_TIMEOUT_SECS")? {
            Some(secs) => Duration::from_secs(secs as u64),
            None => defaults.request_timeout,
        };
        let max_body_bytes = positive_var("MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes);

        Ok(Self {
            bind_addr,
            caption_service_url,
            request_timeout,
            max_body_bytes,
            allowed_origin,
        })
    }

    pub fn with_caption_service_url(mut self, url: impl Into<String>) -> Self {
        self.caption_service_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }
}

fn positive_var(name: &'static str) -> Result<Option<usize>, ConfigError> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };

    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_contract() {
        let config = RelayConfig::default();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.caption_service_url, "http://localhost:8000/caption");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
        assert_eq!(config.allowed_origin, "http://localhost:3000");
    }

    #[test]
    fn builders_override_fields() {
        let config = RelayConfig::default()
            .with_caption_service_url("http://127.0.0.1:9999/caption")
            .with_request_timeout(Duration::from_millis(250))
            .with_max_body_bytes(1024)
            .with_allowed_origin("http://example.test");

        assert_eq!(config.caption_service_url, "http://127.0.0.1:9999/caption");
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.max_body_bytes, 1024);
        assert_eq!(config.allowed_origin, "http://example.test");
    }

    const ENV_VARS: [&str; 2] = ["CAPTION_TIMEOUT_SECS", "MAX_BODY_BYTES"];

    // Clears the numeric overrides even when an assertion fails midway.
    struct EnvGuard;

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for name in ENV_VARS {
                env::remove_var(name);
            }
        }
    }

    // Env vars are process-global, so every env-dependent case lives in one test.
    #[test]
    fn from_env_reads_and_validates_numbers() {
        let _guard = EnvGuard;

        env::set_var("CAPTION_TIMEOUT_SECS", "5");
        env::set_var("MAX_BODY_BYTES", "2048");
        let config = RelayConfig::from_env().unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_body_bytes, 2048);

        env::set_var("MAX_BODY_BYTES", "0");
        assert!(matches!(
            RelayConfig::from_env(),
            Err(ConfigError::InvalidNumber { name: "MAX_BODY_BYTES", .. })
        ));
        env::set_var("MAX_BODY_BYTES", "2048");

        env::set_var("CAPTION_TIMEOUT_SECS", "0");
        assert!(matches!(
            RelayConfig::from_env(),
            Err(ConfigError::InvalidNumber { name: "CAPTION_TIMEOUT_SECS", .. })
        ));

        env::set_var("CAPTION_TIMEOUT_SECS", "soon");
        assert!(RelayConfig::from_env().is_err());

        for name in ENV_VARS {
            env::remove_var(name);
        }
        let config = RelayConfig::from_env().unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}
