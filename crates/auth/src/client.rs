//! OAuth 2.0 client for the Dressipi endpoints
//!
//! Performs the two-step Authorization Code + PKCE exchange and the
//! refresh-token exchange. The authorization endpoint answers with a JSON
//! `{code, state}` body (out-of-band redirect URI, no browser involved), so
//! both steps are plain HTTP round-trips.

use std::time::Duration;

use async_trait::async_trait;
use dressipi_domain::constants::OOB_REDIRECT_URI;
use dressipi_domain::{DressipiError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::pkce::PkceChallenge;
use crate::types::{Credentials, TokenResponse};

/// Authorization endpoint response
#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    code: String,
    state: String,
}

/// Trait for the auth flow operations
///
/// Abstracts the HTTP exchanges so [`crate::session::AuthSession`] can be
/// driven by a mock in tests.
#[async_trait]
pub trait AuthClientApi: Send + Sync {
    /// Run the full PKCE authorization + token exchange
    ///
    /// # Errors
    /// Returns `StateMismatch` when the echoed state differs from the one
    /// sent, `Authentication` for OAuth-level rejections, `Network` for
    /// transport failures (stage-prefixed).
    async fn authenticate(&self, client_id: &str, server_url: &str) -> Result<Credentials>;

    /// Exchange the refresh token for fresh credentials
    ///
    /// # Errors
    /// Same contract as [`AuthClientApi::authenticate`], minus the state
    /// check (there is none on this path).
    async fn refresh(
        &self,
        credentials: &Credentials,
        client_id: &str,
        server_url: &str,
    ) -> Result<Credentials>;
}

/// HTTP implementation of the auth flow
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
}

impl Default for AuthClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthClient {
    /// Create a client with the default 30 second timeout
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Create a client reusing an existing reqwest instance
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Request an authorization code for a fresh PKCE challenge
    async fn request_authorization_code(
        &self,
        client_id: &str,
        server_url: &str,
        challenge: &PkceChallenge,
    ) -> Result<String> {
        let url = format!("{server_url}/oauth/authorize");
        debug!(url = %url, "Requesting Dressipi authorization code");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("response_type", "code"),
                ("client_id", client_id),
                ("state", &challenge.state),
                ("code_challenge", &challenge.code_challenge),
                ("code_challenge_method", challenge.challenge_method()),
                ("redirect_uri", OOB_REDIRECT_URI),
            ])
            .send()
            .await
            .map_err(|e| {
                DressipiError::Network(format!(
                    "Error requesting Dressipi authorization code: {e}"
                ))
            })?;

        if !response.status().is_success() {
            return Err(DressipiError::Authentication(format!(
                "Authorization request rejected with status {}",
                response.status()
            )));
        }

        let authorize: AuthorizeResponse = response.json().await.map_err(|e| {
            DressipiError::Network(format!("Error requesting Dressipi authorization code: {e}"))
        })?;

        // Anti-CSRF invariant: the response must echo the state we sent.
        if authorize.state != challenge.state {
            return Err(DressipiError::StateMismatch);
        }

        Ok(authorize.code)
    }

    /// Exchange an authorization code for credentials
    async fn exchange_code(
        &self,
        client_id: &str,
        server_url: &str,
        code: &str,
        code_verifier: &str,
    ) -> Result<Credentials> {
        let url = format!("{server_url}/oauth/token");
        debug!(url = %url, "Exchanging authorization code for Dressipi access token");

        let response = self
            .client
            .post(&url)
            .query(&[
                ("grant_type", "authorization_code"),
                ("client_id", client_id),
                ("code", code),
                ("code_verifier", code_verifier),
                ("redirect_uri", OOB_REDIRECT_URI),
            ])
            .send()
            .await
            .map_err(|e| {
                DressipiError::Network(format!("Error requesting Dressipi access token: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(DressipiError::Authentication(format!(
                "Token exchange rejected with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            DressipiError::Network(format!("Error requesting Dressipi access token: {e}"))
        })?;

        Ok(token.into())
    }
}

#[async_trait]
impl AuthClientApi for AuthClient {
    async fn authenticate(&self, client_id: &str, server_url: &str) -> Result<Credentials> {
        // Fresh challenge and state per attempt; both live exactly one
        // authorization round-trip.
        let challenge = PkceChallenge::generate();

        let code = self.request_authorization_code(client_id, server_url, &challenge).await?;
        let credentials =
            self.exchange_code(client_id, server_url, &code, &challenge.code_verifier).await?;

        info!("Dressipi authentication completed");
        Ok(credentials)
    }

    async fn refresh(
        &self,
        credentials: &Credentials,
        client_id: &str,
        server_url: &str,
    ) -> Result<Credentials> {
        let url = format!("{server_url}/oauth/token");
        debug!(url = %url, "Refreshing Dressipi access token");

        let response = self
            .client
            .post(&url)
            .query(&[
                ("grant_type", "refresh_token"),
                ("client_id", client_id),
                ("refresh_token", &credentials.refresh_token),
            ])
            .send()
            .await
            .map_err(|e| {
                DressipiError::Network(format!("Error refreshing Dressipi access token: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(DressipiError::Authentication(format!(
                "Token refresh rejected with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            DressipiError::Network(format!("Error refreshing Dressipi access token: {e}"))
        })?;

        info!("Dressipi access token refreshed");
        Ok(token.into())
    }
}
