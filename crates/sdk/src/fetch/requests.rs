//! Request seam between the fetch layer and the discovery services

use async_trait::async_trait;
use dressipi_auth::Credentials;
use dressipi_domain::{
    DressipiError, FacettedSearchMappedResponse, RelatedItemsMappedResponse, Result,
};
use reqwest::Client;

use crate::api::types::{FacettedSearchRequest, RelatedItemsRequest};
use crate::api::{
    facetted_search, map_facetted_search_response, map_related_items_response, related_items,
};

/// A request the [`super::Fetcher`] can run
///
/// Implementations pair the endpoint call with its mapper, so the fetcher
/// only ever sees mapped output.
#[async_trait]
pub trait DiscoveryRequest: Send + Sync {
    /// Mapped response type
    type Output: Send;

    /// Local validation, before any network call
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` when a required correlating
    /// field is missing.
    fn validate(&self) -> Result<()>;

    /// Normalized serialized form, the memo key for request deduplication
    fn cache_key(&self) -> String;

    /// Issue the request and map the response
    ///
    /// # Errors
    /// Propagates the service and mapper errors unchanged.
    async fn execute(
        &self,
        client: &Client,
        server_url: &str,
        credentials: &Credentials,
    ) -> Result<Self::Output>;
}

#[async_trait]
impl DiscoveryRequest for FacettedSearchRequest {
    type Output = FacettedSearchMappedResponse;

    fn validate(&self) -> Result<()> {
        // Every field is optional; an empty facet list is a valid browse.
        Ok(())
    }

    fn cache_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    async fn execute(
        &self,
        client: &Client,
        server_url: &str,
        credentials: &Credentials,
    ) -> Result<Self::Output> {
        let response = facetted_search(client, server_url, self, Some(credentials)).await?;
        Ok(map_facetted_search_response(response))
    }
}

#[async_trait]
impl DiscoveryRequest for RelatedItemsRequest {
    type Output = RelatedItemsMappedResponse;

    fn validate(&self) -> Result<()> {
        if self.item_id.is_empty() {
            return Err(DressipiError::Validation(
                "Related items request requires an item_id".to_string(),
            ));
        }
        Ok(())
    }

    fn cache_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    async fn execute(
        &self,
        client: &Client,
        server_url: &str,
        credentials: &Credentials,
    ) -> Result<Self::Output> {
        let response = related_items(client, server_url, self, Some(credentials)).await?;
        map_related_items_response(response, self.response_format)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for request validation and memo keys.
    use super::*;

    #[test]
    fn related_request_requires_item_id() {
        let missing = RelatedItemsRequest::default();
        assert!(matches!(missing.validate(), Err(DressipiError::Validation(_))));

        let present = RelatedItemsRequest::new("SKU-1");
        assert!(present.validate().is_ok());
    }

    #[test]
    fn facetted_request_is_always_valid() {
        assert!(FacettedSearchRequest::default().validate().is_ok());
    }

    #[test]
    fn cache_key_tracks_request_content() {
        let a = RelatedItemsRequest::new("SKU-1");
        let b = RelatedItemsRequest::new("SKU-1");
        let c = RelatedItemsRequest::new("SKU-2");

        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
    }
}
