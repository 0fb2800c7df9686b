//! Wire-format types for the discovery endpoints
//!
//! These mirror what the API actually sends and accept whatever fields the
//! mapped domain types need. Consumers never see them; the mappers in
//! [`super::mappers`] translate them into `dressipi-domain` shapes.

use dressipi_domain::ItemStatus;
use serde::{Deserialize, Serialize};

/// Garment representation requested from the API
///
/// `Detailed` is the only format the SDK understands today; the `match` in
/// the related-items mapper is where a future variant plugs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentFormat {
    #[default]
    Detailed,
}

impl GarmentFormat {
    /// Value sent as the `garment_format` query parameter
    #[must_use]
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Detailed => "detailed",
        }
    }
}

/// One facet dimension of a facetted-search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub value: serde_json::Value,
}

impl Facet {
    #[must_use]
    pub fn new(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self { name: name.into(), value }
    }
}

/// Facetted-search request
///
/// `response_format` is the SDK-side name; it goes out on the wire as the
/// `garment_format` query parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacettedSearchRequest {
    pub facets: Vec<Facet>,
    pub response_format: GarmentFormat,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl FacettedSearchRequest {
    #[must_use]
    pub fn new(facets: Vec<Facet>) -> Self {
        Self { facets, ..Self::default() }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }
}

/// Related-items request
///
/// `item_id` is the partner's product code and is required; a request
/// without one fails local validation before any network call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelatedItemsRequest {
    pub item_id: String,
    pub response_format: GarmentFormat,
    pub max_similar_items: Option<u32>,
    pub outfits_per_occasion: Option<u32>,
}

impl RelatedItemsRequest {
    #[must_use]
    pub fn new(item_id: impl Into<String>) -> Self {
        Self { item_id: item_id.into(), ..Self::default() }
    }
}

/// Pagination block as the facetted-search endpoint sends it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ApiPagination {
    pub total_pages: u32,
    pub total_entries: u64,
    pub current_page: u32,
}

/// Recommendation item in a facetted-search response
///
/// Carries the partner product code (`garment_id`) and the raw numeric id
/// (`raw_garment_id`) side by side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationItem {
    pub garment_id: String,
    pub raw_garment_id: u64,
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub old_price: Option<String>,
    pub brand_name: String,
    pub url: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub best_model_image: Option<String>,
    #[serde(default)]
    pub best_product_image: Option<String>,
    #[serde(default)]
    pub has_outfits: bool,
    pub garment_status: ItemStatus,
    #[serde(default)]
    pub style_id: Option<u64>,
}

/// Facetted-search wire response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacettedSearchApiResponse {
    pub event_id: String,
    pub content_id: String,
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    pub pagination: ApiPagination,
}

/// Full garment record in a related-items response
///
/// Everything else in the response references these by the numeric `id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GarmentData {
    pub id: u64,
    pub garment_id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub old_price: Option<String>,
    pub brand_name: String,
    pub url: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub best_model_image: Option<String>,
    #[serde(default)]
    pub best_product_image: Option<String>,
    #[serde(default)]
    pub has_outfits: bool,
    pub garment_status: ItemStatus,
    #[serde(default)]
    pub style_id: Option<u64>,
}

/// Outfit as the related-items endpoint sends it: id-only item references
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiOutfit {
    pub content_id: String,
    pub occasion: String,
    #[serde(default)]
    pub items: Vec<u64>,
}

/// Similar-items block with id-only references
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSimilarItems {
    pub content_id: String,
    #[serde(default)]
    pub items: Vec<u64>,
}

/// Related-items wire response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelatedItemsApiResponse {
    pub event_id: String,
    /// Numeric id of the item the request was made for
    pub source: u64,
    #[serde(default)]
    pub garment_data: Vec<GarmentData>,
    #[serde(default)]
    pub outfits: Vec<ApiOutfit>,
    #[serde(default)]
    pub partner_outfits: Vec<ApiOutfit>,
    #[serde(default)]
    pub similar_items: Option<ApiSimilarItems>,
}

/// Error body the API attaches to non-success responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
