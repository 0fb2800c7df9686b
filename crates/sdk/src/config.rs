//! SDK configuration
//!
//! Explicit construction is the primary path; `from_env` exists for hosts
//! that configure through the environment.
//!
//! ## Environment Variables
//! - `DRESSIPI_SERVER_URL`: base URL of the Dressipi server, scheme included
//! - `DRESSIPI_CLIENT_ID`: OAuth client id
//! - `DRESSIPI_NAMESPACE_ID`: tracking namespace (defaults to the client id)
//! - `DRESSIPI_AUTH_ENABLED`: whether authentication runs (default true)

use dressipi_auth::SessionConfig;
use dressipi_domain::{DressipiError, Result};

/// Configuration for one SDK instance
#[derive(Debug, Clone)]
pub struct DressipiConfig {
    /// Base URL of the Dressipi server, scheme included
    pub server_url: String,
    /// OAuth client id issued by Dressipi
    pub client_id: String,
    /// Namespace id salting the identify-email hash
    pub namespace_id: String,
    /// When false the auth session stays idle and discovery fetchers never
    /// fire
    pub enable_authentication: bool,
}

impl DressipiConfig {
    #[must_use]
    pub fn new(
        server_url: impl Into<String>,
        client_id: impl Into<String>,
        namespace_id: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            client_id: client_id.into(),
            namespace_id: namespace_id.into(),
            enable_authentication: true,
        }
    }

    /// Toggle authentication on or off
    #[must_use]
    pub fn with_authentication(mut self, enabled: bool) -> Self {
        self.enable_authentication = enabled;
        self
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns `DressipiError::Config` if a required variable is missing or
    /// empty.
    pub fn from_env() -> Result<Self> {
        let server_url = env_var("DRESSIPI_SERVER_URL")?;
        let client_id = env_var("DRESSIPI_CLIENT_ID")?;
        let namespace_id =
            std::env::var("DRESSIPI_NAMESPACE_ID").unwrap_or_else(|_| client_id.clone());
        let enable_authentication = env_bool("DRESSIPI_AUTH_ENABLED", true);

        Ok(Self { server_url, client_id, namespace_id, enable_authentication })
    }

    /// Auth-session view of this configuration
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.client_id.clone(), self.server_url.clone())
            .with_enabled(self.enable_authentication)
    }
}

fn env_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(DressipiError::Config(format!("Missing environment variable: {name}"))),
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}
