//! Authentication and token lifecycle configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration.
///
/// Access and refresh tokens are signed with separate HS256 secrets. Lifetimes
/// are fixed policy in the core and deliberately not configurable here.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign and verify access tokens
    pub access_secret: String,

    /// Secret used to sign and verify refresh tokens
    pub refresh_secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &mask_secret(&self.access_secret))
            .field("refresh_secret", &mask_secret(&self.refresh_secret))
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration from both secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
        }
    }

    /// Create from `JWT_ACCESS_SECRET` / `JWT_REFRESH_SECRET`.
    ///
    /// There are no fallback values: an unset secret stays empty.
    pub fn from_env() -> Self {
        Self {
            access_secret: std::env::var("JWT_ACCESS_SECRET").unwrap_or_default(),
            refresh_secret: std::env::var("JWT_REFRESH_SECRET").unwrap_or_default(),
        }
    }

    /// Check both secrets are present and distinct
    pub fn validate(&self) -> Result<(), String> {
        if self.access_secret.is_empty() {
            return Err("JWT_ACCESS_SECRET not configured".to_string());
        }
        if self.refresh_secret.is_empty() {
            return Err("JWT_REFRESH_SECRET not configured".to_string());
        }
        if self.access_secret == self.refresh_secret {
            return Err("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ".to_string());
        }
        Ok(())
    }
}

/// Scheduling for the expired refresh token sweeper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenCleanupSettings {
    /// Whether the background sweeper runs at all
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,

    /// Seconds between sweeps
    #[serde(default = "default_cleanup_interval")]
    pub interval_seconds: u64,
}

impl Default for TokenCleanupSettings {
    fn default() -> Self {
        Self {
            enabled: default_cleanup_enabled(),
            interval_seconds: default_cleanup_interval(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Upper bound for a single durable or cache store call, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Expired refresh token sweeper
    #[serde(default)]
    pub cleanup: TokenCleanupSettings,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            store_timeout_ms: default_store_timeout_ms(),
            cleanup: TokenCleanupSettings::default(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let store_timeout_ms = std::env::var("STORE_TIMEOUT_MS")
            .unwrap_or_else(|_| default_store_timeout_ms().to_string())
            .parse()
            .unwrap_or(default_store_timeout_ms());
        let interval_seconds = std::env::var("TOKEN_CLEANUP_INTERVAL_SECS")
            .unwrap_or_else(|_| default_cleanup_interval().to_string())
            .parse()
            .unwrap_or(default_cleanup_interval());
        let enabled = std::env::var("TOKEN_CLEANUP_ENABLED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(default_cleanup_enabled());

        Self {
            jwt: JwtConfig::from_env(),
            store_timeout_ms,
            cleanup: TokenCleanupSettings {
                enabled,
                interval_seconds,
            },
        }
    }

    /// Store timeout as a `Duration`
    pub fn store_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.store_timeout_ms)
    }
}

fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "****"
    }
}

fn default_store_timeout_ms() -> u64 {
    2000
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    3600
}
