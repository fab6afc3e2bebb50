//! Service endpoint configuration

use std::env;
use std::time::Duration;
use truthlens_core::{Error, Result};

/// Base address used when running in production mode
pub const PRODUCTION_BASE_URL: &str = "https://truthlens-backend-production.up.railway.app";
/// Base address used in development mode (local backend)
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:8000";
/// Deadline for a single health probe
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Deployment mode of the analysis service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    /// Interpret an environment flag. Only "production" selects production;
    /// anything else, including no flag at all, means development.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if value.trim().eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Development => DEVELOPMENT_BASE_URL,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

/// Named endpoints exposed by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Analyze,
    Chat,
}

impl Endpoint {
    pub fn all() -> [Endpoint; 3] {
        [Endpoint::Health, Endpoint::Analyze, Endpoint::Chat]
    }

    /// Path suffix appended to the base address
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Health => "/api/v1/health",
            Endpoint::Analyze => "/api/v1/analyze",
            Endpoint::Chat => "/api/v1/chat",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Health => "health",
            Endpoint::Analyze => "analyze",
            Endpoint::Chat => "chat",
        }
    }
}

/// Resolved configuration for talking to the analysis service.
///
/// Built once at startup and handed to the prober and the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub environment: Environment,
    pub base_url: String,
    pub health_timeout: Duration,
    /// Deadline for analysis calls; `None` lets them run as long as the service takes
    pub analysis_timeout: Option<Duration>,
}

impl ApiConfig {
    /// Resolve the base address from the mode and an optional explicit override.
    ///
    /// A blank override counts as absent.
    pub fn resolve(environment: Environment, base_url_override: Option<&str>) -> Self {
        let base_url = base_url_override
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| environment.default_base_url())
            .trim_end_matches('/')
            .to_string();

        Self {
            environment,
            base_url,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            analysis_timeout: None,
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = lookup("TRUTHLENS_ENV").or_else(|| lookup("APP_ENV"));
        let base_override = lookup("TRUTHLENS_API_BASE_URL").or_else(|| lookup("API_BASE_URL"));

        let mut config = Self::resolve(Environment::from_flag(flag.as_deref()), base_override.as_deref());

        if let Some(ms) = lookup("TRUTHLENS_HEALTH_TIMEOUT_MS") {
            config.health_timeout = parse_millis("TRUTHLENS_HEALTH_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("TRUTHLENS_ANALYZE_TIMEOUT_MS") {
            config.analysis_timeout = Some(parse_millis("TRUTHLENS_ANALYZE_TIMEOUT_MS", &ms)?);
        }

        Ok(config)
    }

    /// Set the health probe deadline
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Put analysis calls under a deadline as well
    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = Some(timeout);
        self
    }

    /// Full URL of a named endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    pub fn is_local(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| Error::Configuration(format!("{} must be a number of milliseconds, got {:?}", key, value)))
}
