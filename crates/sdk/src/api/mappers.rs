//! Wire-to-domain response mapping
//!
//! Pure functions. The facetted-search mapping is 1:1 and infallible; the
//! related-items mapping resolves id-only references through an index of
//! `garment_data` and treats a dangling reference as a hard error — the
//! response would be internally inconsistent, and silently dropping the
//! item would corrupt outfits.

use std::collections::HashMap;

use dressipi_domain::constants::EMPTY_CONTENT_ID;
use dressipi_domain::types::response::SimilarItems;
use dressipi_domain::{
    DetailedItem, DressipiError, FacettedSearchMappedResponse, Outfit, Pagination,
    RelatedItemsMappedResponse, Result,
};

use super::types::{
    ApiOutfit, FacettedSearchApiResponse, GarmentData, GarmentFormat, RecommendationItem,
    RelatedItemsApiResponse,
};

/// Map a facetted-search wire response
///
/// Renames the pagination fields (`total_pages → last_page`,
/// `total_entries → total_items`) and normalizes every recommendation.
#[must_use]
pub fn map_facetted_search_response(
    response: FacettedSearchApiResponse,
) -> FacettedSearchMappedResponse {
    FacettedSearchMappedResponse {
        event_id: response.event_id,
        content_id: response.content_id,
        items: response.recommendations.into_iter().map(map_recommendation).collect(),
        pagination: Pagination {
            last_page: response.pagination.total_pages,
            total_items: response.pagination.total_entries,
            current_page: response.pagination.current_page,
        },
    }
}

/// Map a related-items wire response
///
/// # Errors
/// - `DressipiError::Mapping` when an outfit, similar-items block, or the
///   source references an id absent from `garment_data`
pub fn map_related_items_response(
    response: RelatedItemsApiResponse,
    format: GarmentFormat,
) -> Result<RelatedItemsMappedResponse> {
    // The seam for future garment formats; `Detailed` is the only one the
    // API serves today.
    match format {
        GarmentFormat::Detailed => map_related_items_detailed(response),
    }
}

fn map_related_items_detailed(
    response: RelatedItemsApiResponse,
) -> Result<RelatedItemsMappedResponse> {
    let index: HashMap<u64, &GarmentData> =
        response.garment_data.iter().map(|garment| (garment.id, garment)).collect();

    let source = resolve(&index, response.source)?;

    let outfits = response
        .outfits
        .iter()
        .map(|outfit| map_outfit(&index, outfit, &source))
        .collect::<Result<Vec<_>>>()?;

    let partner_outfits = response
        .partner_outfits
        .iter()
        .map(|outfit| map_outfit(&index, outfit, &source))
        .collect::<Result<Vec<_>>>()?;

    let similar_items = match &response.similar_items {
        Some(similar)
            if !similar.content_id.is_empty() && similar.content_id != EMPTY_CONTENT_ID =>
        {
            Some(SimilarItems {
                content_id: similar.content_id.clone(),
                items: similar
                    .items
                    .iter()
                    .map(|id| resolve(&index, *id))
                    .collect::<Result<Vec<_>>>()?,
            })
        }
        // Empty or sentinel content id: "no similar items", not an error.
        _ => None,
    };

    Ok(RelatedItemsMappedResponse {
        event_id: response.event_id,
        source,
        outfits,
        partner_outfits,
        similar_items,
    })
}

fn map_outfit(
    index: &HashMap<u64, &GarmentData>,
    outfit: &ApiOutfit,
    source: &DetailedItem,
) -> Result<Outfit> {
    // The source item always leads the outfit's item list.
    let mut items = Vec::with_capacity(outfit.items.len() + 1);
    items.push(source.clone());
    for id in &outfit.items {
        items.push(resolve(index, *id)?);
    }

    Ok(Outfit { content_id: outfit.content_id.clone(), occasion: outfit.occasion.clone(), items })
}

fn resolve(index: &HashMap<u64, &GarmentData>, id: u64) -> Result<DetailedItem> {
    index
        .get(&id)
        .map(|garment| map_garment(garment))
        .ok_or_else(|| DressipiError::Mapping(format!("Item with ID {id} not found in response data")))
}

fn map_recommendation(item: RecommendationItem) -> DetailedItem {
    DetailedItem {
        id: item.garment_id,
        dressipi_item_id: item.raw_garment_id,
        name: item.name,
        price: item.price,
        old_price: item.old_price,
        brand_name: item.brand_name,
        url: item.url,
        category_name: item.category_name,
        category_id: item.category_id,
        images: item.images.unwrap_or_default(),
        image_url: item.image_url.unwrap_or_default(),
        best_model_image: item.best_model_image,
        best_product_image: item.best_product_image,
        has_outfits: item.has_outfits,
        status: item.garment_status,
        style_id: item.style_id,
    }
}

fn map_garment(garment: &GarmentData) -> DetailedItem {
    DetailedItem {
        id: garment.garment_id.clone(),
        dressipi_item_id: garment.id,
        name: garment.name.clone(),
        price: garment.price.clone(),
        old_price: garment.old_price.clone(),
        brand_name: garment.brand_name.clone(),
        url: garment.url.clone(),
        category_name: garment.category_name.clone(),
        category_id: garment.category_id,
        images: garment.images.clone().unwrap_or_default(),
        image_url: garment.image_url.clone().unwrap_or_default(),
        best_model_image: garment.best_model_image.clone(),
        best_product_image: garment.best_product_image.clone(),
        has_outfits: garment.has_outfits,
        status: garment.garment_status,
        style_id: garment.style_id,
    }
}
