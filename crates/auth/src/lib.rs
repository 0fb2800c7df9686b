//! OAuth 2.0 + PKCE authentication core for the Dressipi SDK
//!
//! Implements the Authorization Code + PKCE flow against the Dressipi OAuth
//! endpoints, token refresh, credential persistence behind a storage trait,
//! and the stateful session orchestrator the rest of the SDK reads its
//! authentication state from.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   AuthSession   │  Stateful orchestrator (idle → authenticating → …)
//! └────────┬────────┘
//!          │
//!          ├──► AuthClient        (HTTP PKCE + refresh exchanges)
//!          ├──► CredentialStore   (persistence, keyed by client_id + server)
//!          │
//!          └──► pkce / jwt        (challenge generation, claim inspection)
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dressipi_auth::storage::MemoryCredentialStore;
//! use dressipi_auth::{AuthClient, AuthSession, SessionConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::new("my-client-id", "https://api.dressipi.example");
//! let session = AuthSession::new(
//!     config,
//!     Arc::new(AuthClient::new()),
//!     Arc::new(MemoryCredentialStore::new()),
//! );
//!
//! session.initialize().await;
//! let state = session.state();
//! assert!(state.is_authenticated || state.error.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod client;
pub mod jwt;
pub mod pkce;
pub mod session;
pub mod storage;
pub mod types;

pub use client::{AuthClient, AuthClientApi};
pub use jwt::{decode_claims, has_expired, network_user_id, Claims};
pub use pkce::{generate_code_challenge, generate_code_verifier, generate_state, PkceChallenge};
pub use session::{AuthSession, CredentialsProvider, SessionConfig};
pub use storage::{CredentialStore, MemoryCredentialStore};
pub use types::{AuthError, AuthErrorCode, AuthState, Credentials, TokenResponse};
