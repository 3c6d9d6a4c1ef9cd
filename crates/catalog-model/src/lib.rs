//! # catalog-model
//!
//! Clothing catalog entities (sizes, categories, items, item sizes, images)
//! and their conversion into [`plain_codec::Value`] trees.
//!
//! Prices and discounts are [`rust_decimal::Decimal`]s with two decimal places
//! and only turn into floats in the plain form, next to the derived discounted
//! price.
//!
//! ## Modules
//!
//! - [`entities`] — the entities and the `ToPlain` conversion
//! - [`catalog`] — in-memory store with uniqueness checks and text pages
//! - [`error`] — error types

pub mod catalog;
pub mod entities;
pub mod error;

pub use catalog::Catalog;
pub use entities::{
    isoformat, Category, ClothingItem, ClothingItemSize, ItemImage, Size, ToPlain,
};
pub use error::{CatalogError, Result};
pub use rust_decimal::Decimal;
