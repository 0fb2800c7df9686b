//! Mapped response envelopes

use serde::{Deserialize, Serialize};

use super::item::{DetailedItem, Outfit};

/// Pagination block after mapper renaming
///
/// The wire response says `total_pages`/`total_entries`; consumers see
/// `last_page`/`total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub last_page: u32,
    pub total_items: u64,
    pub current_page: u32,
}

/// Mapped result of a facetted-search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacettedSearchMappedResponse {
    pub event_id: String,
    pub content_id: String,
    pub items: Vec<DetailedItem>,
    pub pagination: Pagination,
}

/// Similar-items block of a mapped related-items response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarItems {
    pub content_id: String,
    pub items: Vec<DetailedItem>,
}

/// Mapped result of a related-items request
///
/// `similar_items` is omitted entirely when the wire response carried an
/// empty or sentinel `content_id` — that is "no similar items", not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedItemsMappedResponse {
    pub event_id: String,
    pub source: DetailedItem,
    pub outfits: Vec<Outfit>,
    pub partner_outfits: Vec<Outfit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_items: Option<SimilarItems>,
}
