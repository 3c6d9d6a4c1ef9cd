//! Catalog entities and their plain-value form.
//!
//! Every entity implements [`ToPlain`]. Related entities are resolved through
//! the [`Catalog`] passed in, which is also where derived fields such as a
//! category's item count come from.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use plain_codec::Value;
use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};

/// Conversion into a plain value tree ready for the encoder.
pub trait ToPlain {
    fn to_plain(&self, catalog: &Catalog) -> Value;
}

pub const SIZE_NAME_MAX_LEN: usize = 10;
pub const NAME_MAX_LEN: usize = 255;
pub const PRICE_MAX_DIGITS: usize = 20;
pub const DISCOUNT_MAX_DIGITS: usize = 5;
pub const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    pub id: i64,
    pub name: String,
}

impl ToPlain for Size {
    fn to_plain(&self, _catalog: &Catalog) -> Value {
        Value::mapping([
            ("id", Value::Integer(self.id)),
            ("name", Value::from(self.name.as_str())),
            ("class_name", Value::from("Size")),
        ])
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl ToPlain for Category {
    fn to_plain(&self, catalog: &Catalog) -> Value {
        Value::mapping([
            ("id", Value::Integer(self.id)),
            ("name", Value::from(self.name.as_str())),
            ("slug", Value::from(self.slug.as_str())),
            ("item_count", Value::Integer(catalog.item_count(self.id) as i64)),
            ("class_name", Value::from("Category")),
        ])
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A size offered for an item. `size` is `None` when the size record is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct ClothingItemSize {
    pub size: Option<Size>,
    pub available: bool,
}

impl ToPlain for ClothingItemSize {
    fn to_plain(&self, catalog: &Catalog) -> Value {
        Value::mapping([
            (
                "size",
                self.size
                    .as_ref()
                    .map_or(Value::Null, |size| size.to_plain(catalog)),
            ),
            ("available", Value::Bool(self.available)),
        ])
    }
}

/// A product image stored under the catalog's media root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemImage {
    /// Storage name relative to the media root, e.g. `product/2025/05/19/a.jpg`.
    pub image: Option<String>,
}

impl ItemImage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            image: Some(name.into()).filter(|n: &String| !n.is_empty()),
        }
    }
}

impl ToPlain for ItemImage {
    fn to_plain(&self, catalog: &Catalog) -> Value {
        let url = self
            .image
            .as_deref()
            .map(|name| Value::from(catalog.media_url(name)));
        Value::mapping([
            ("image_url", url.unwrap_or(Value::Null)),
            ("filename", Value::from(self.image.as_deref().unwrap_or(""))),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClothingItem {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub available: bool,
    pub sizes: Vec<ClothingItemSize>,
    pub category_id: i64,
    pub images: Vec<ItemImage>,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub price: Decimal,
    pub discount: Decimal,
}

impl ClothingItem {
    /// A new available item with no sizes, images or timestamps. The id is
    /// assigned when the item is added to a [`Catalog`].
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        category_id: i64,
        price: Decimal,
        discount: Decimal,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            slug: slug.into(),
            available: true,
            sizes: Vec::new(),
            category_id,
            images: Vec::new(),
            description: String::new(),
            created_at: None,
            updated_at: None,
            price,
            discount,
        }
    }

    /// `price * (1 - discount / 100)` when a discount is set, else `price`.
    pub fn price_with_discount(&self) -> Decimal {
        if self.discount > Decimal::ZERO {
            self.price * (Decimal::ONE - self.discount / Decimal::ONE_HUNDRED)
        } else {
            self.price
        }
    }

    /// Field-level checks for values the catalog refuses to store.
    pub fn validate(&self) -> Result<()> {
        validate_name("name", &self.name, NAME_MAX_LEN)?;
        validate_slug(&self.slug)?;
        if self.price < Decimal::ZERO {
            return Err(CatalogError::Validation {
                field: "price",
                message: format!("must not be negative, got {}", self.price),
            });
        }
        validate_decimal("price", self.price, PRICE_MAX_DIGITS)?;
        validate_decimal("discount", self.discount, DISCOUNT_MAX_DIGITS)
    }
}

impl ToPlain for ClothingItem {
    fn to_plain(&self, catalog: &Catalog) -> Value {
        let category = catalog
            .category(self.category_id)
            .map_or(Value::Null, |category| category.to_plain(catalog));
        Value::mapping([
            ("id", Value::Integer(self.id)),
            ("name", Value::from(self.name.as_str())),
            ("slug", Value::from(self.slug.as_str())),
            ("available", Value::Bool(self.available)),
            (
                "sizes",
                Value::Sequence(self.sizes.iter().map(|s| s.to_plain(catalog)).collect()),
            ),
            ("category", category),
            (
                "images",
                Value::Sequence(self.images.iter().map(|i| i.to_plain(catalog)).collect()),
            ),
            ("description", Value::from(self.description.as_str())),
            ("created_at", Value::from(self.created_at.map(isoformat))),
            ("updated_at", Value::from(self.updated_at.map(isoformat))),
            ("price", float(self.price)),
            ("discount", float(self.discount)),
            ("price_with_discount", float(self.price_with_discount())),
        ])
    }
}

impl std::fmt::Display for ClothingItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Nearest `f64` to a decimal. Goes through the decimal text so the result is
/// correctly rounded.
fn float(d: Decimal) -> Value {
    d.to_string()
        .parse::<f64>()
        .map_or(Value::Null, Value::Float)
}

/// ISO 8601 with a numeric UTC offset; microseconds only when non-zero.
pub fn isoformat(at: DateTime<Utc>) -> String {
    let precision = if at.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    at.to_rfc3339_opts(precision, false)
}

pub(crate) fn validate_name(field: &'static str, name: &str, max_len: usize) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation {
            field,
            message: "must not be blank".to_string(),
        });
    }
    if name.chars().count() > max_len {
        return Err(CatalogError::Validation {
            field,
            message: format!("longer than {max_len} characters"),
        });
    }
    Ok(())
}

/// At most [`DECIMAL_PLACES`] fractional digits and `max_digits` in total.
fn validate_decimal(field: &'static str, value: Decimal, max_digits: usize) -> Result<()> {
    if value.normalize().scale() > DECIMAL_PLACES {
        return Err(CatalogError::Validation {
            field,
            message: format!("more than {DECIMAL_PLACES} decimal places in {value}"),
        });
    }
    let whole = value.abs().trunc().normalize();
    let whole_digits = if whole.is_zero() {
        0
    } else {
        whole.to_string().len()
    };
    let max_whole = max_digits - DECIMAL_PLACES as usize;
    if whole_digits > max_whole {
        return Err(CatalogError::Validation {
            field,
            message: format!("more than {max_whole} digits before the decimal point in {value}"),
        });
    }
    Ok(())
}

/// Slugs are non-empty runs of ASCII letters, digits, `-` and `_`.
pub(crate) fn validate_slug(slug: &str) -> Result<()> {
    let ok = !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if ok {
        Ok(())
    } else {
        Err(CatalogError::Validation {
            field: "slug",
            message: format!("{slug:?} is not a valid slug"),
        })
    }
}
