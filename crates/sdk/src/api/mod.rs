//! Discovery API: requests, wire types, and response mapping
//!
//! The two endpoints are stateless request/response functions; the mappers
//! translate the wire shapes into the normalized `dressipi-domain` types.
//! Nothing in this module holds state — orchestration (memoization,
//! auth-retry) lives in [`crate::fetch`].

pub mod facetted_search;
pub mod mappers;
pub mod related_items;
pub mod types;

pub use facetted_search::facetted_search;
pub use mappers::{map_facetted_search_response, map_related_items_response};
pub use related_items::related_items;
pub use types::{FacettedSearchRequest, GarmentFormat, RelatedItemsRequest};
