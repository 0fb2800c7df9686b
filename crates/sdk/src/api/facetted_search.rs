//! Facetted-search endpoint
//!
//! `POST {server_url}/recommendations/facetted` — search filtered by a set
//! of named dimensions. Stateless: everything the call needs comes in as
//! arguments.

use dressipi_auth::Credentials;
use dressipi_domain::{DressipiError, Result};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::debug;

use super::types::{FacettedSearchApiResponse, FacettedSearchRequest};

/// Issue a facetted-search request
///
/// The bearer header is attached only when credentials are present; a
/// not-yet-consented caller simply goes without.
///
/// # Errors
/// - `DressipiError::Authentication` on 401/403
/// - `DressipiError::Network` for transport failures and unexpected
///   statuses, stage-prefixed
pub async fn facetted_search(
    client: &Client,
    server_url: &str,
    request: &FacettedSearchRequest,
    credentials: Option<&Credentials>,
) -> Result<FacettedSearchApiResponse> {
    let url = format!("{server_url}/recommendations/facetted");
    debug!(url = %url, facets = request.facets.len(), "Facetted search request");

    let mut query: Vec<(&str, String)> =
        vec![("garment_format", request.response_format.as_query_value().to_string())];
    if let Some(page) = request.page {
        query.push(("page", page.to_string()));
    }
    if let Some(per_page) = request.per_page {
        query.push(("per_page", per_page.to_string()));
    }

    let mut builder = client
        .post(&url)
        .query(&query)
        .json(&json!({ "facets": &request.facets }));
    if let Some(credentials) = credentials {
        builder = builder.bearer_auth(&credentials.access_token);
    }

    let response = builder.send().await.map_err(|e| {
        DressipiError::Network(format!("Error requesting Dressipi facetted search: {e}"))
    })?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(DressipiError::Authentication(format!(
            "Facetted search rejected with status {status}"
        )));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DressipiError::Network(format!(
            "Error requesting Dressipi facetted search: status {status}: {body}"
        )));
    }

    response.json().await.map_err(|e| {
        DressipiError::Network(format!("Error requesting Dressipi facetted search: {e}"))
    })
}
