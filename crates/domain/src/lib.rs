//! Shared data model for the Dressipi client SDK.
//!
//! This crate holds the types every other SDK crate agrees on: the error
//! taxonomy, wire-level constants, and the normalized item/outfit shapes
//! produced by the response mappers. It is pure data — no I/O, no async.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod constants;
pub mod errors;
pub mod types;

pub use errors::{DressipiError, Result};
pub use types::response::SimilarItems;
pub use types::{
    DetailedItem, FacettedSearchMappedResponse, ItemStatus, Outfit, Pagination,
    RelatedItemsMappedResponse,
};
