//! Item and outfit types

use serde::{Deserialize, Serialize};

/// Stock status of a garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "in stock")]
    InStock,
    #[serde(rename = "out of stock")]
    OutOfStock,
}

/// Normalized product representation
///
/// Produced exclusively by the response mappers; both wire formats (facetted
/// search recommendations and related-items garment data) converge on this
/// shape. `id` is the partner's product code, `dressipi_item_id` the raw
/// numeric id the API cross-references internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedItem {
    pub id: String,
    pub dressipi_item_id: u64,
    pub name: String,
    pub price: Option<String>,
    pub old_price: Option<String>,
    pub brand_name: String,
    pub url: String,
    pub category_name: Option<String>,
    pub category_id: Option<u64>,
    /// All known product images; empty when the response carried none
    pub images: Vec<String>,
    /// Primary image URL; empty string when the response carried none
    pub image_url: String,
    pub best_model_image: Option<String>,
    pub best_product_image: Option<String>,
    pub has_outfits: bool,
    pub status: ItemStatus,
    pub style_id: Option<u64>,
}

/// A curated bundle of items presented as a styled combination
///
/// For related-items responses the source item is always the first element
/// of `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub content_id: String,
    pub occasion: String,
    pub items: Vec<DetailedItem>,
}
