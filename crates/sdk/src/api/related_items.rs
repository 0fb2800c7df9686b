//! Related-items endpoint
//!
//! `GET {server_url}/items/{item_id}/related` — outfits, partner outfits,
//! and similar items for one garment. Stateless, like its facetted-search
//! sibling.

use dressipi_auth::Credentials;
use dressipi_domain::{DressipiError, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::types::{ApiErrorBody, RelatedItemsApiResponse, RelatedItemsRequest};

/// Message the API uses for an unknown source garment.
const GARMENT_NOT_FOUND: &str = "Garment not found";

/// Issue a related-items request
///
/// # Errors
/// - `DressipiError::Authentication` on 401/403
/// - `DressipiError::GarmentNotFound` on a 404 whose error message is
///   exactly `Garment not found` — the expected no-data outcome
/// - `DressipiError::Network` for everything else, stage-prefixed
pub async fn related_items(
    client: &Client,
    server_url: &str,
    request: &RelatedItemsRequest,
    credentials: Option<&Credentials>,
) -> Result<RelatedItemsApiResponse> {
    let url =
        format!("{server_url}/items/{}/related", urlencoding::encode(&request.item_id));
    debug!(url = %url, "Related items request");

    let mut query: Vec<(&str, String)> =
        vec![("garment_format", request.response_format.as_query_value().to_string())];
    if let Some(max) = request.max_similar_items {
        query.push(("max_similar_items", max.to_string()));
    }
    if let Some(per_occasion) = request.outfits_per_occasion {
        query.push(("outfits_per_occasion", per_occasion.to_string()));
    }

    let mut builder = client.get(&url).query(&query);
    if let Some(credentials) = credentials {
        builder = builder.bearer_auth(&credentials.access_token);
    }

    let response = builder.send().await.map_err(|e| {
        DressipiError::Network(format!("Error requesting Dressipi related items: {e}"))
    })?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(DressipiError::Authentication(format!(
            "Related items rejected with status {status}"
        )));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        // The API reports an unknown source garment as a 404 with a fixed
        // message; anything else on 404 is a real error.
        if status == StatusCode::NOT_FOUND {
            let parsed: Option<ApiErrorBody> = serde_json::from_str(&body).ok();
            if parsed.and_then(|b| b.message).as_deref() == Some(GARMENT_NOT_FOUND) {
                return Err(DressipiError::GarmentNotFound);
            }
        }

        return Err(DressipiError::Network(format!(
            "Error requesting Dressipi related items: status {status}: {body}"
        )));
    }

    response.json().await.map_err(|e| {
        DressipiError::Network(format!("Error requesting Dressipi related items: {e}"))
    })
}
