//! In-memory catalog store.
//!
//! Owns sizes, categories and items, enforces the uniqueness rules between
//! them, and produces the text pages served for a single item and for the
//! full product list.

use chrono::{DateTime, Utc};
use plain_codec::Value;

use crate::entities::{
    validate_name, validate_slug, Category, ClothingItem, ClothingItemSize, ItemImage, Size,
    ToPlain, NAME_MAX_LEN, SIZE_NAME_MAX_LEN,
};
use crate::error::{CatalogError, Result};

pub const DEFAULT_MEDIA_URL: &str = "/media/";

#[derive(Debug, Clone)]
pub struct Catalog {
    media_url: String,
    sizes: Vec<Size>,
    categories: Vec<Category>,
    items: Vec<ClothingItem>,
    next_id: i64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::with_media_url(DEFAULT_MEDIA_URL)
    }

    /// A catalog whose image URLs are rooted at `media_url`.
    pub fn with_media_url(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
            sizes: Vec::new(),
            categories: Vec::new(),
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Public URL of a stored media file.
    pub fn media_url(&self, name: &str) -> String {
        format!("{}{}", self.media_url, name)
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ------------------------------------------------------------------
    // Sizes
    // ------------------------------------------------------------------

    pub fn add_size(&mut self, name: impl Into<String>) -> Result<i64> {
        let name = name.into();
        validate_name("name", &name, SIZE_NAME_MAX_LEN)?;
        if self.sizes.iter().any(|s| s.name == name) {
            return Err(CatalogError::Duplicate {
                entity: "size",
                key: name,
            });
        }
        let id = self.allocate_id();
        tracing::debug!(id, name = %name, "size added");
        self.sizes.push(Size { id, name });
        Ok(id)
    }

    pub fn size(&self, id: i64) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<i64> {
        let name = name.into();
        let slug = slug.into();
        validate_name("name", &name, NAME_MAX_LEN)?;
        validate_slug(&slug)?;
        if self.categories.iter().any(|c| c.name == name) {
            return Err(CatalogError::Duplicate {
                entity: "category",
                key: name,
            });
        }
        if self.categories.iter().any(|c| c.slug == slug) {
            return Err(CatalogError::Duplicate {
                entity: "category",
                key: slug,
            });
        }
        let id = self.allocate_id();
        tracing::debug!(id, name = %name, slug = %slug, "category added");
        self.categories.push(Category { id, name, slug });
        Ok(id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// All categories ordered by name.
    pub fn categories(&self) -> Vec<&Category> {
        let mut sorted: Vec<&Category> = self.categories.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// Number of items filed under `category_id`.
    pub fn item_count(&self, category_id: i64) -> usize {
        self.items
            .iter()
            .filter(|item| item.category_id == category_id)
            .count()
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    /// Validate and store `item`, stamping both timestamps with the current
    /// time. Returns the assigned id.
    pub fn add_item(&mut self, item: ClothingItem) -> Result<i64> {
        self.add_item_at(item, Utc::now())
    }

    /// Same as [`Catalog::add_item`] with an explicit clock reading.
    pub fn add_item_at(&mut self, mut item: ClothingItem, now: DateTime<Utc>) -> Result<i64> {
        item.validate()?;
        if self.category(item.category_id).is_none() {
            return Err(CatalogError::NotFound(format!(
                "category {}",
                item.category_id
            )));
        }
        if self.items.iter().any(|i| i.slug == item.slug) {
            return Err(CatalogError::Duplicate {
                entity: "item",
                key: item.slug,
            });
        }
        item.id = self.allocate_id();
        item.created_at = Some(now);
        item.updated_at = Some(now);
        tracing::debug!(id = item.id, slug = %item.slug, "item added");
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    pub fn item_by_slug(&self, slug: &str) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.slug == slug)
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    fn item_mut(&mut self, slug: &str) -> Result<&mut ClothingItem> {
        self.items
            .iter_mut()
            .find(|item| item.slug == slug)
            .ok_or_else(|| CatalogError::NotFound(format!("item {slug}")))
    }

    /// Offer size `size_id` for the item at `slug`. A size can be offered
    /// once per item.
    pub fn add_item_size(&mut self, slug: &str, size_id: i64, available: bool) -> Result<()> {
        let size = self
            .size(size_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("size {size_id}")))?;
        let item = self.item_mut(slug)?;
        let taken = item
            .sizes
            .iter()
            .any(|s| s.size.as_ref().is_some_and(|s| s.id == size_id));
        if taken {
            return Err(CatalogError::Duplicate {
                entity: "item size",
                key: format!("{slug}/{}", size.name),
            });
        }
        item.sizes.push(ClothingItemSize {
            size: Some(size),
            available,
        });
        Ok(())
    }

    /// Attach an image stored under the media root to the item at `slug`.
    pub fn add_image(&mut self, slug: &str, name: impl Into<String>) -> Result<()> {
        let item = self.item_mut(slug)?;
        item.images.push(ItemImage::new(name));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    /// The item at `slug` as plain-codec text.
    pub fn encode_item(&self, slug: &str, indent: Option<usize>) -> Result<String> {
        let item = self
            .item_by_slug(slug)
            .ok_or_else(|| CatalogError::NotFound(format!("item {slug}")))?;
        Ok(plain_codec::encode(&item.to_plain(self), indent)?)
    }

    /// Every item, in insertion order, as one plain-codec sequence.
    pub fn all_products_text(&self, indent: Option<usize>) -> Result<String> {
        let products = Value::Sequence(self.items.iter().map(|i| i.to_plain(self)).collect());
        let text = plain_codec::encode(&products, indent)?;
        tracing::debug!(items = self.items.len(), bytes = text.len(), "products encoded");
        Ok(text)
    }
}
