//! Dressipi fashion-recommendation client SDK
//!
//! Everything a consumer needs to talk to the Dressipi discovery API:
//! authentication (re-exported from `dressipi-auth`), the facetted-search
//! and related-items endpoints with response mapping, per-feature fetch
//! orchestration, and the event-tracking facade with its offline queue.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dressipi_sdk::api::types::RelatedItemsRequest;
//! use dressipi_sdk::auth::storage::MemoryCredentialStore;
//! use dressipi_sdk::auth::{AuthClient, AuthSession};
//! use dressipi_sdk::fetch::RelatedItemsFetcher;
//! use dressipi_sdk::DressipiConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DressipiConfig::new(
//!     "https://api.dressipi.example",
//!     "my-client-id",
//!     "my-namespace",
//! );
//!
//! let session = Arc::new(AuthSession::new(
//!     config.session_config(),
//!     Arc::new(AuthClient::new()),
//!     Arc::new(MemoryCredentialStore::new()),
//! ));
//! session.initialize().await;
//!
//! let mut fetcher = RelatedItemsFetcher::new(config.server_url.clone(), session);
//! let request = RelatedItemsRequest::new("SKU-123");
//! let state = fetcher.load(&request).await;
//! if let Some(response) = &state.data {
//!     println!("{} outfits", response.outfits.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod fetch;
pub mod tracking;

/// Authentication core (re-export)
pub use dressipi_auth as auth;
/// Shared data model (re-export)
pub use dressipi_domain as domain;

pub use config::DressipiConfig;
pub use domain::{DressipiError, Result};
