//! Per-feature fetch orchestration
//!
//! One `Fetcher` per request type combines the pieces the discovery
//! services deliberately leave out: credential gating, an explicit
//! last-successful-request memo (so an unchanged request is never
//! re-issued), and the single forced credential refresh after an
//! authentication failure. Errors become state; nothing escapes to the
//! caller.

mod requests;

pub use requests::DiscoveryRequest;

use std::sync::Arc;

use dressipi_auth::{Credentials, CredentialsProvider};
use dressipi_domain::{DressipiError, Result};
use reqwest::Client;
use tracing::debug;

use crate::api::types::{FacettedSearchRequest, RelatedItemsRequest};

/// Fetcher over a facetted-search request
pub type FacettedSearchFetcher = Fetcher<FacettedSearchRequest>;
/// Fetcher over a related-items request
pub type RelatedItemsFetcher = Fetcher<RelatedItemsRequest>;

/// Observable result of the latest load
#[derive(Debug)]
pub struct FetchState<T> {
    /// Mapped response of the last successful load; `None` before the first
    /// success and after a no-data outcome
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<DressipiError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None }
    }
}

/// Request orchestrator for one discovery feature
///
/// `load` borrows `&mut self`, so one fetcher never runs two requests
/// concurrently; independent fetchers race freely.
pub struct Fetcher<R: DiscoveryRequest> {
    client: Client,
    server_url: String,
    auth: Arc<dyn CredentialsProvider>,
    last_success_key: Option<String>,
    state: FetchState<R::Output>,
}

impl<R: DiscoveryRequest> Fetcher<R> {
    #[must_use]
    pub fn new(server_url: impl Into<String>, auth: Arc<dyn CredentialsProvider>) -> Self {
        Self::with_client(Client::new(), server_url, auth)
    }

    /// Build a fetcher reusing an existing reqwest client
    #[must_use]
    pub fn with_client(
        client: Client,
        server_url: impl Into<String>,
        auth: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            client,
            server_url: server_url.into(),
            auth,
            last_success_key: None,
            state: FetchState::default(),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &FetchState<R::Output> {
        &self.state
    }

    /// Mapped data of the last successful load
    #[must_use]
    pub fn data(&self) -> Option<&R::Output> {
        self.state.data.as_ref()
    }

    /// Forget the memo so the next `load` re-issues the request even if it
    /// is unchanged
    pub fn invalidate(&mut self) {
        self.last_success_key = None;
    }

    /// Run the request if it needs running
    ///
    /// Skips the network when validation fails, when no credentials exist
    /// yet, or when the request equals the last successfully fetched one.
    /// A `GarmentNotFound` outcome is recorded as empty data, not as an
    /// error, and memoized like a success.
    pub async fn load(&mut self, request: &R) -> &FetchState<R::Output> {
        if let Err(e) = request.validate() {
            self.state.loading = false;
            self.state.error = Some(e);
            return &self.state;
        }

        let Some(credentials) = self.auth.credentials() else {
            debug!("Fetch skipped; no credentials yet");
            return &self.state;
        };

        let key = request.cache_key();
        if self.last_success_key.as_deref() == Some(key.as_str()) {
            debug!("Fetch skipped; request unchanged since last success");
            return &self.state;
        }

        self.state.loading = true;
        self.state.error = None;

        match self.execute_with_auth_retry(request, credentials).await {
            Ok(data) => {
                self.state.data = Some(data);
                self.last_success_key = Some(key);
            }
            Err(DressipiError::GarmentNotFound) => {
                debug!("Garment not found; recording empty result");
                self.state.data = None;
                self.last_success_key = Some(key);
            }
            Err(e) => {
                self.state.error = Some(e);
            }
        }

        self.state.loading = false;
        &self.state
    }

    /// Execute, allowing exactly one forced refresh on an authentication
    /// failure. A second authentication failure is terminal — no loop.
    async fn execute_with_auth_retry(
        &self,
        request: &R,
        credentials: Credentials,
    ) -> Result<R::Output> {
        match request.execute(&self.client, &self.server_url, &credentials).await {
            Err(e) if e.is_authentication() => {
                debug!("Authentication failure; forcing one credential refresh");
                self.auth.refresh().await?;

                let Some(fresh) = self.auth.credentials() else {
                    return Err(e);
                };
                request.execute(&self.client, &self.server_url, &fresh).await
            }
            outcome => outcome,
        }
    }
}

impl<R: DiscoveryRequest> std::fmt::Debug for Fetcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("server_url", &self.server_url)
            .field("loading", &self.state.loading)
            .field("has_data", &self.state.data.is_some())
            .finish()
    }
}
