//! Stateful authentication orchestrator
//!
//! `AuthSession` owns the `idle → authenticating → {authenticated, failed}`
//! state machine: on initialization it loads cached credentials, validates
//! expiry, refreshes or re-authenticates as needed, and persists the result.
//! Instances are fully independent — persistence is delegated to the
//! credential store, which keys by `(client_id, server_url)`, so multiple
//! sessions never share in-process state.

use std::sync::Arc;

use async_trait::async_trait;
use dressipi_domain::{DressipiError, Result};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::client::AuthClientApi;
use crate::jwt;
use crate::storage::CredentialStore;
use crate::types::{AuthError, AuthErrorCode, AuthState, Credentials};

/// Configuration for one auth session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// OAuth client id issued by Dressipi
    pub client_id: String,
    /// Base URL of the Dressipi server, scheme included
    pub server_url: String,
    /// When false the session stays idle and performs no I/O at all
    pub enabled: bool,
}

impl SessionConfig {
    #[must_use]
    pub fn new(client_id: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), server_url: server_url.into(), enabled: true }
    }

    /// Toggle authentication on or off
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Narrow seam the fetch layer depends on
///
/// Fetchers only need a credentials snapshot and the ability to force one
/// refresh after an authentication failure; they never drive the full
/// session lifecycle.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Current credentials, if authenticated
    fn credentials(&self) -> Option<Credentials>;

    /// Force a refresh-token exchange
    ///
    /// # Errors
    /// Returns the refresh failure; a no-op (already refreshing, or nothing
    /// to refresh) is `Ok(())`.
    async fn refresh(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Authenticating,
    Authenticated,
    Failed,
}

#[derive(Debug)]
struct Inner {
    phase: Phase,
    credentials: Option<Credentials>,
    network_user_id: Option<String>,
    error: Option<AuthError>,
}

impl Default for Inner {
    fn default() -> Self {
        Self { phase: Phase::Idle, credentials: None, network_user_id: None, error: None }
    }
}

/// Authentication orchestrator
///
/// The lock is never held across an await: every transition copies what it
/// needs, releases, performs I/O, then re-acquires to apply the outcome.
pub struct AuthSession {
    config: SessionConfig,
    client: Arc<dyn AuthClientApi>,
    store: Arc<dyn CredentialStore>,
    inner: RwLock<Inner>,
}

impl AuthSession {
    #[must_use]
    pub fn new(
        config: SessionConfig,
        client: Arc<dyn AuthClientApi>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self { config, client, store, inner: RwLock::new(Inner::default()) }
    }

    /// Establish authentication state
    ///
    /// Call once on mount and again whenever `client_id`/`server_url`
    /// change. Disabled sessions stay idle with no side effects. Cached,
    /// unexpired credentials are used without a network call; expired ones
    /// go through the refresh exchange; absent ones through the full PKCE
    /// flow. The outcome — including failure — lands in [`Self::state`],
    /// never in a returned error.
    pub async fn initialize(&self) {
        if !self.config.enabled {
            debug!("Authentication disabled; session stays idle");
            return;
        }

        {
            let mut inner = self.inner.write();
            if inner.phase == Phase::Authenticating {
                return;
            }
            inner.phase = Phase::Authenticating;
            inner.error = None;
        }

        let cached = match self
            .store
            .get_credentials(&self.config.client_id, &self.config.server_url)
            .await
        {
            Ok(cached) => cached,
            Err(e) => {
                // A broken store reads as "nothing cached"; authentication
                // can still succeed over the network.
                warn!(error = %e, "Credential store lookup failed");
                None
            }
        };

        if let Some(cached) = &cached {
            if !jwt::has_expired(Some(cached)) {
                debug!("Cached credentials still valid; no network call");
                self.apply_authenticated(cached.clone(), false).await;
                return;
            }
        }

        let outcome = match &cached {
            Some(expired) => {
                debug!("Cached credentials expired; refreshing");
                self.client
                    .refresh(expired, &self.config.client_id, &self.config.server_url)
                    .await
            }
            None => {
                debug!("No cached credentials; running PKCE authentication");
                self.client.authenticate(&self.config.client_id, &self.config.server_url).await
            }
        };

        match outcome {
            Ok(credentials) => self.apply_authenticated(credentials, true).await,
            Err(e) => self.apply_failed(&e, AuthErrorCode::AuthError),
        }
    }

    /// Manually refresh the access token
    ///
    /// No-op while an authentication attempt is already in flight, and when
    /// no credentials exist yet — both would make the exchange redundant or
    /// invalid.
    ///
    /// # Errors
    /// Returns the refresh failure after recording it in state with code
    /// `REFRESH_ERROR`.
    pub async fn refresh(&self) -> Result<()> {
        let current = {
            let mut inner = self.inner.write();
            if inner.phase == Phase::Authenticating {
                debug!("Refresh skipped; authentication already in flight");
                return Ok(());
            }
            let Some(credentials) = inner.credentials.clone() else {
                debug!("Refresh skipped; no credentials to refresh");
                return Ok(());
            };
            inner.phase = Phase::Authenticating;
            inner.error = None;
            credentials
        };

        match self
            .client
            .refresh(&current, &self.config.client_id, &self.config.server_url)
            .await
        {
            Ok(credentials) => {
                self.apply_authenticated(credentials, true).await;
                Ok(())
            }
            Err(e) => {
                self.apply_failed(&e, AuthErrorCode::RefreshError);
                Err(e)
            }
        }
    }

    /// Withdraw consent: drop credentials from store and memory
    ///
    /// # Errors
    /// Returns `DressipiError::Storage` when the backend fails to remove
    /// the entry; in-memory state is reset regardless.
    pub async fn clear(&self) -> Result<()> {
        *self.inner.write() = Inner::default();
        self.store.remove_credentials(&self.config.server_url).await?;
        info!("Credentials cleared");
        Ok(())
    }

    /// Snapshot of the current authentication state
    #[must_use]
    pub fn state(&self) -> AuthState {
        let inner = self.inner.read();
        AuthState {
            is_authenticating: inner.phase == Phase::Authenticating,
            is_authenticated: inner.phase == Phase::Authenticated,
            credentials: inner.credentials.clone(),
            network_user_id: inner.network_user_id.clone(),
            error: inner.error.clone(),
        }
    }

    /// True once the session holds usable credentials
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().phase == Phase::Authenticated
    }

    /// The session configuration
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    async fn apply_authenticated(&self, credentials: Credentials, persist: bool) {
        if persist {
            if let Err(e) = self
                .store
                .set_credentials(&self.config.client_id, &self.config.server_url, &credentials)
                .await
            {
                // Failing to persist does not invalidate the live session;
                // the next mount will just re-authenticate.
                warn!(error = %e, "Failed to persist credentials");
            }
        }

        let network_user_id = jwt::network_user_id(Some(&credentials));

        let mut inner = self.inner.write();
        inner.phase = Phase::Authenticated;
        inner.credentials = Some(credentials);
        inner.network_user_id = network_user_id;
        inner.error = None;

        info!("Authentication state: authenticated");
    }

    fn apply_failed(&self, error: &DressipiError, code: AuthErrorCode) {
        let mut inner = self.inner.write();
        inner.phase = Phase::Failed;
        inner.credentials = None;
        inner.network_user_id = None;
        inner.error = Some(AuthError::new(error.to_string(), code));

        warn!(error = %error, ?code, "Authentication state: failed");
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish()
    }
}

#[async_trait]
impl CredentialsProvider for AuthSession {
    fn credentials(&self) -> Option<Credentials> {
        self.inner.read().credentials.clone()
    }

    async fn refresh(&self) -> Result<()> {
        Self::refresh(self).await
    }
}
