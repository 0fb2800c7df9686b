//! Credential persistence
//!
//! The storage backend is an external collaborator: platform keychains,
//! encrypted files, whatever the host application provides. The SDK only
//! depends on the [`CredentialStore`] trait and ships an in-memory
//! implementation for tests and for consumers that opt out of persistence.
//!
//! Entries are namespaced by a derived key (`dressipi-{client_id}`) scoped
//! to the server URL, so two clients talking to the same server never read
//! each other's tokens.

use std::collections::HashMap;

use async_trait::async_trait;
use dressipi_domain::constants::credential_key;
use dressipi_domain::{DressipiError, Result};
use parking_lot::RwLock;
use tracing::debug;

use crate::types::Credentials;

/// Trait for credential storage backends
///
/// Implementations persist the serialized token blob opaquely. A lookup
/// whose stored key does not match the derived key for the given client id
/// must return `Ok(None)`, not an error — a foreign entry is the same as no
/// entry.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Retrieve credentials for a client on a server
    ///
    /// # Errors
    /// Returns `DressipiError::Storage` if the backend itself fails; an
    /// absent or foreign entry is `Ok(None)`.
    async fn get_credentials(
        &self,
        client_id: &str,
        server_url: &str,
    ) -> Result<Option<Credentials>>;

    /// Persist credentials for a client on a server
    ///
    /// Overwrites any previous entry for the same server URL. Last write
    /// wins on concurrent writers.
    ///
    /// # Errors
    /// Returns `DressipiError::Storage` if the backend fails to persist.
    async fn set_credentials(
        &self,
        client_id: &str,
        server_url: &str,
        credentials: &Credentials,
    ) -> Result<()>;

    /// Remove whatever credentials are stored for a server
    ///
    /// # Errors
    /// Returns `DressipiError::Storage` if the backend fails; removing an
    /// absent entry is not an error.
    async fn remove_credentials(&self, server_url: &str) -> Result<()>;
}

/// In-memory credential store
///
/// Volatile stand-in for a platform backend; the default store in tests and
/// in consumers that have not wired a persistent one. Thread-safe, keyed
/// like the real thing.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    /// server_url → (derived key, serialized credentials)
    entries: RwLock<HashMap<String, (String, String)>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, across all servers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_credentials(
        &self,
        client_id: &str,
        server_url: &str,
    ) -> Result<Option<Credentials>> {
        let derived = credential_key(client_id);
        let entries = self.entries.read();

        let Some((stored_key, serialized)) = entries.get(server_url) else {
            return Ok(None);
        };
        if *stored_key != derived {
            // Entry belongs to a different client id on this server.
            debug!(server_url, "Stored credential key does not match requested client");
            return Ok(None);
        }

        let credentials = serde_json::from_str(serialized)
            .map_err(|e| DressipiError::Storage(format!("Corrupt stored credentials: {e}")))?;
        Ok(Some(credentials))
    }

    async fn set_credentials(
        &self,
        client_id: &str,
        server_url: &str,
        credentials: &Credentials,
    ) -> Result<()> {
        let serialized = serde_json::to_string(credentials)
            .map_err(|e| DressipiError::Storage(format!("Failed to serialize credentials: {e}")))?;

        self.entries
            .write()
            .insert(server_url.to_string(), (credential_key(client_id), serialized));

        debug!(server_url, "Credentials stored");
        Ok(())
    }

    async fn remove_credentials(&self, server_url: &str) -> Result<()> {
        self.entries.write().remove(server_url);
        debug!(server_url, "Credentials removed");
        Ok(())
    }
}
