//! Integration tests for the discovery layer
//!
//! Real HTTP against wiremock: endpoint behavior, response mapping through
//! the fetchers, the single forced refresh on 401, and the guarantees that
//! invalid or unchanged requests never touch the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dressipi_auth::{Credentials, CredentialsProvider};
use dressipi_domain::{DressipiError, Result};
use dressipi_sdk::api::types::{FacettedSearchRequest, RelatedItemsRequest};
use dressipi_sdk::api::{facetted_search, related_items};
use dressipi_sdk::fetch::{FacettedSearchFetcher, RelatedItemsFetcher};
use parking_lot::Mutex;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn credentials(token: &str) -> Credentials {
    Credentials {
        access_token: token.to_string(),
        refresh_token: "refresh".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
    }
}

/// Provider with scripted credentials; a refresh swaps in the next set.
struct StubProvider {
    current: Mutex<Option<Credentials>>,
    next: Mutex<Option<Credentials>>,
    refresh_calls: AtomicUsize,
}

impl StubProvider {
    fn with(current: Option<Credentials>) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(current),
            next: Mutex::new(None),
            refresh_calls: AtomicUsize::new(0),
        })
    }

    fn refreshing_to(current: Credentials, next: Credentials) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(Some(current)),
            next: Mutex::new(Some(next)),
            refresh_calls: AtomicUsize::new(0),
        })
    }

    fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialsProvider for StubProvider {
    fn credentials(&self) -> Option<Credentials> {
        self.current.lock().clone()
    }

    async fn refresh(&self) -> Result<()> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.next.lock().take() {
            *self.current.lock() = Some(next);
        }
        Ok(())
    }
}

/// Matches requests carrying no Authorization header at all.
struct NoAuthHeader;

impl Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn garment_json(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "garment_id": format!("SKU-{id}"),
        "name": format!("Garment {id}"),
        "price": "49.00",
        "brand_name": "Acme",
        "url": format!("https://shop.example/{id}"),
        "image_url": format!("https://img.example/{id}.jpg"),
        "images": [format!("https://img.example/{id}.jpg")],
        "has_outfits": true,
        "garment_status": "in stock",
    })
}

fn related_body() -> serde_json::Value {
    json!({
        "event_id": "evt-related-1",
        "source": 1,
        "garment_data": [garment_json(1), garment_json(2), garment_json(3)],
        "outfits": [
            { "content_id": "outfit-1", "occasion": "work", "items": [2, 3] }
        ],
        "partner_outfits": [],
        "similar_items": { "content_id": "similar-1", "items": [2] },
    })
}

fn facetted_body() -> serde_json::Value {
    json!({
        "event_id": "evt-facetted-1",
        "content_id": "content-1",
        "recommendations": [
            {
                "garment_id": "SKU-A",
                "raw_garment_id": 11,
                "name": "Item A",
                "brand_name": "Acme",
                "url": "https://shop.example/a",
                "garment_status": "in stock",
            },
            {
                "garment_id": "SKU-B",
                "raw_garment_id": 12,
                "name": "Item B",
                "brand_name": "Acme",
                "url": "https://shop.example/b",
                "garment_status": "out of stock",
            }
        ],
        "pagination": { "total_pages": 5, "total_entries": 120, "current_page": 2 },
    })
}

#[tokio::test]
async fn facetted_fetcher_maps_the_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommendations/facetted"))
        .and(query_param("garment_format", "detailed"))
        .and(header("authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facetted_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = StubProvider::with(Some(credentials("live-token")));
    let mut fetcher = FacettedSearchFetcher::new(server.uri(), provider);

    let state = fetcher.load(&FacettedSearchRequest::default()).await;

    assert!(state.error.is_none());
    let data = state.data.as_ref().unwrap();
    assert_eq!(data.pagination.last_page, 5);
    assert_eq!(data.pagination.total_items, 120);
    assert_eq!(data.pagination.current_page, 2);
    assert_eq!(data.items.len(), 2);
    assert_eq!(data.items[0].id, "SKU-A");
    assert_eq!(data.items[0].dressipi_item_id, 11);
}

#[tokio::test]
async fn unchanged_request_is_not_refetched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommendations/facetted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facetted_body()))
        .mount(&server)
        .await;

    let provider = StubProvider::with(Some(credentials("live-token")));
    let mut fetcher = FacettedSearchFetcher::new(server.uri(), provider);

    let request = FacettedSearchRequest::default();
    fetcher.load(&request).await;
    let state = fetcher.load(&request).await; // memo hit, no second request

    assert!(state.data.is_some());
    assert!(state.error.is_none());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    // A different request does go out again.
    let other = FacettedSearchRequest::default().with_page(2, 20);
    let state = fetcher.load(&other).await;
    assert!(state.data.is_some());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn related_fetcher_maps_outfits_and_similar_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/SKU-1/related"))
        .and(query_param("garment_format", "detailed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(related_body()))
        .mount(&server)
        .await;

    let provider = StubProvider::with(Some(credentials("live-token")));
    let mut fetcher = RelatedItemsFetcher::new(server.uri(), provider);

    let state = fetcher.load(&RelatedItemsRequest::new("SKU-1")).await;

    let data = state.data.as_ref().unwrap();
    assert_eq!(data.source.id, "SKU-1");
    assert_eq!(data.outfits[0].items.len(), 3);
    assert_eq!(data.outfits[0].items[0].id, "SKU-1"); // source prepended
    assert_eq!(data.similar_items.as_ref().unwrap().items.len(), 1);
}

#[tokio::test]
async fn missing_item_id_fails_fast_with_no_request() {
    let server = MockServer::start().await;

    // Zero requests expected; verified when the server drops.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(related_body()))
        .expect(0)
        .mount(&server)
        .await;

    let provider = StubProvider::with(Some(credentials("live-token")));
    let mut fetcher = RelatedItemsFetcher::new(server.uri(), provider);

    let state = fetcher.load(&RelatedItemsRequest::default()).await;

    assert!(!state.loading);
    assert!(matches!(state.error, Some(DressipiError::Validation(_))));
    assert!(state.data.is_none());
}

#[tokio::test]
async fn no_credentials_means_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(related_body()))
        .expect(0)
        .mount(&server)
        .await;

    let provider = StubProvider::with(None);
    let mut fetcher = RelatedItemsFetcher::new(server.uri(), provider);

    let state = fetcher.load(&RelatedItemsRequest::new("SKU-1")).await;

    assert!(state.data.is_none());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn garment_not_found_is_empty_data_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/GONE/related"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Garment not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = StubProvider::with(Some(credentials("live-token")));
    let mut fetcher = RelatedItemsFetcher::new(server.uri(), provider);

    let request = RelatedItemsRequest::new("GONE");
    let state = fetcher.load(&request).await;

    assert!(state.data.is_none());
    assert!(state.error.is_none());

    // The no-data outcome is memoized like a success.
    fetcher.load(&request).await;
}

#[tokio::test]
async fn other_404s_stay_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/SKU-1/related"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "No route" })))
        .mount(&server)
        .await;

    let provider = StubProvider::with(Some(credentials("live-token")));
    let mut fetcher = RelatedItemsFetcher::new(server.uri(), provider);

    let state = fetcher.load(&RelatedItemsRequest::new("SKU-1")).await;
    assert!(matches!(state.error, Some(DressipiError::Network(_))));
}

#[tokio::test]
async fn a_401_forces_one_refresh_then_retries() {
    let server = MockServer::start().await;

    // Stale token is rejected once.
    Mock::given(method("GET"))
        .and(path("/items/SKU-1/related"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // Fresh token succeeds.
    Mock::given(method("GET"))
        .and(path("/items/SKU-1/related"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(related_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        StubProvider::refreshing_to(credentials("stale-token"), credentials("fresh-token"));
    let mut fetcher = RelatedItemsFetcher::new(server.uri(), provider.clone());

    let state = fetcher.load(&RelatedItemsRequest::new("SKU-1")).await;

    assert!(state.error.is_none());
    assert!(state.data.is_some());
    assert_eq!(provider.refresh_count(), 1);
}

#[tokio::test]
async fn a_second_401_is_terminal() {
    let server = MockServer::start().await;

    // Every token is rejected.
    Mock::given(method("GET"))
        .and(path("/items/SKU-1/related"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let provider =
        StubProvider::refreshing_to(credentials("stale-token"), credentials("still-bad-token"));
    let mut fetcher = RelatedItemsFetcher::new(server.uri(), provider.clone());

    let state = fetcher.load(&RelatedItemsRequest::new("SKU-1")).await;

    assert!(matches!(state.error, Some(DressipiError::Authentication(_))));
    assert!(state.data.is_none());
    // Exactly one forced refresh; no retry loop.
    assert_eq!(provider.refresh_count(), 1);
}

#[tokio::test]
async fn service_call_without_credentials_omits_the_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommendations/facetted"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(facetted_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let response =
        facetted_search(&client, &server.uri(), &FacettedSearchRequest::default(), None)
            .await
            .unwrap();

    assert_eq!(response.event_id, "evt-facetted-1");
}

#[tokio::test]
async fn service_call_surfaces_403_as_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/SKU-1/related"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = related_items(
        &client,
        &server.uri(),
        &RelatedItemsRequest::new("SKU-1"),
        Some(&credentials("live-token")),
    )
    .await;

    assert!(matches!(result, Err(DressipiError::Authentication(_))));
}

#[tokio::test]
async fn item_ids_are_url_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event_id": "evt",
            "source": 1,
            "garment_data": [garment_json(1)],
        })))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = related_items(
        &client,
        &server.uri(),
        &RelatedItemsRequest::new("SKU/1"),
        None,
    )
    .await;
    assert!(result.is_ok());

    // The slash must have been escaped, not treated as a path separator.
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].url.path().contains("SKU%2F1"));
}
