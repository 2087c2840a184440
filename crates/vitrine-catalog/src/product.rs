//! The typed product model and the versioned payload mapping layer.
//!
//! Upstream payloads stay loosely shaped for compatibility with several
//! backend generations; this module is the single place where they become
//! well typed. The mapper is versioned so hosts can tell which mapping
//! rules produced a catalog, and it degrades row by row: a malformed row is
//! dropped and counted, never fatal for the payload.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use vitrine_core::{ErrorInfo, SchemaVersion, VitrineError};

use crate::brand::resolve_brand;
use crate::category::{normalize_subcategory, Category};
use crate::dto::{self, RawProduct};

/// Image shown when a row carries no usable image at all.
pub const PLACEHOLDER_IMAGE: &str = "/img/placeholder.png";

/// One well-typed catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable positive identifier.
    pub id: u64,
    /// Display name; never empty.
    pub name: String,
    /// Current price in rubles.
    pub price: i64,
    /// Pre-discount price, kept only when positive.
    pub old_price: Option<i64>,
    /// Gallery image URLs; never empty.
    pub images: Vec<String>,
    /// Resolved main category.
    pub category: Category,
    /// Normalized subcategory slug.
    pub subcategory: Option<String>,
    /// Resolved brand name.
    pub brand: Option<String>,
    /// Backend brand id used by recommendation ranking.
    pub brand_id: Option<i64>,
    /// Merchandising badge, trimmed.
    pub badge: Option<String>,
    /// Premium flag; premium rows stay out of the home catalog.
    pub premium: bool,
    /// Explicit novelty flag.
    pub is_new: bool,
    /// Gender attribution.
    pub gender: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Units left in stock.
    pub stock: Option<i64>,
    /// Popularity score used by the default sort.
    pub popularity: Option<f64>,
    /// Recommendation score attached by the personalization endpoint.
    pub recommendation_score: Option<f64>,
    /// Description text.
    pub description: Option<String>,
}

/// Result of mapping one catalog payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedCatalog {
    /// Successfully mapped products, in payload order.
    pub products: Vec<Product>,
    /// Version of the mapping rules that produced them.
    pub schema: SchemaVersion,
    /// Number of rows dropped as unmappable.
    pub dropped: usize,
}

/// The versioned mapping layer from wire rows to [`Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductMapper {
    schema: SchemaVersion,
}

impl Default for ProductMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductMapper {
    /// Version of the current mapping rules.
    pub const SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

    /// Creates a mapper for the current schema.
    pub fn new() -> Self {
        Self {
            schema: Self::SCHEMA,
        }
    }

    /// Returns the mapper's schema version.
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Maps one wire row to a typed product.
    ///
    /// Field precedence follows the upstream clients: `name` falls back to
    /// `title`, `label` and finally a generated placeholder; `price` falls
    /// back to `minPrice` and `amount`. A row without a usable positive id
    /// is an error; everything else degrades to defaults.
    pub fn map(&self, raw: &RawProduct) -> Result<Product, VitrineError> {
        let id = map_id(raw)?;

        let name = [&raw.name, &raw.title, &raw.label]
            .into_iter()
            .find_map(|field| trimmed(field.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Товар #{id}"));

        let price = [&raw.price, &raw.min_price, &raw.amount]
            .into_iter()
            .find_map(|field| field.as_ref())
            .and_then(dto::scalar_i64)
            .unwrap_or(0);

        let old_price = raw
            .old_price
            .as_ref()
            .or(raw.original_price.as_ref())
            .and_then(dto::scalar_i64)
            .filter(|old| *old > 0);

        let category = match raw.raw_category() {
            Some(label) => Category::parse(&label),
            None => Category::parse(""),
        };

        Ok(Product {
            id,
            name,
            price,
            old_price,
            images: pick_images(raw),
            category,
            subcategory: raw.raw_subcategory().and_then(normalize_subcategory),
            brand: resolve_brand(raw),
            brand_id: raw
                .brand_id
                .as_ref()
                .and_then(dto::scalar_i64)
                .filter(|id| *id > 0),
            badge: trimmed(raw.badge.as_deref()).map(str::to_string),
            premium: raw.premium.or(raw.is_premium).unwrap_or(false),
            is_new: raw.is_new == Some(true),
            gender: [&raw.gender, &raw.sex, &raw.target_gender]
                .into_iter()
                .find_map(|field| trimmed(field.as_deref()))
                .map(str::to_string),
            created_at: raw.created_at.as_ref().and_then(parse_created_at),
            stock: raw
                .stock
                .as_ref()
                .or(raw.quantity.as_ref())
                .and_then(dto::scalar_i64),
            popularity: raw.popularity.as_ref().and_then(dto::scalar_f64),
            recommendation_score: raw
                .recommendation
                .as_ref()
                .and_then(|envelope| envelope.score.as_ref())
                .and_then(dto::scalar_f64),
            description: [&raw.description, &raw.short_description, &raw.subtitle]
                .into_iter()
                .find_map(|field| trimmed(field.as_deref()))
                .map(str::to_string),
        })
    }

    /// Maps a whole catalog payload.
    ///
    /// Accepts either `{ "products": [...] }` or a bare JSON array.
    /// Unmappable rows are dropped, counted and logged; a payload of the
    /// wrong shape is the only fatal case.
    pub fn map_payload(&self, payload: &Value) -> Result<MappedCatalog, VitrineError> {
        let rows = if let Some(rows) = payload.get("products").and_then(Value::as_array) {
            rows
        } else if let Some(rows) = payload.as_array() {
            rows
        } else {
            return Err(VitrineError::Catalog(
                ErrorInfo::new(
                    "catalog.payload_shape",
                    "payload is neither a product array nor an object with a products field",
                )
                .with_hint("expected { \"products\": [...] } or a bare JSON array"),
            ));
        };

        let mut products = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;
        for (index, row) in rows.iter().enumerate() {
            let raw: RawProduct = match serde_json::from_value(row.clone()) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!("dropping product row {}: {}", index, err);
                    dropped += 1;
                    continue;
                }
            };
            match self.map(&raw) {
                Ok(product) => products.push(product),
                Err(err) => {
                    warn!("dropping product row {}: {}", index, err);
                    dropped += 1;
                }
            }
        }

        debug!("mapped {} products, dropped {}", products.len(), dropped);
        Ok(MappedCatalog {
            products,
            schema: self.schema,
            dropped,
        })
    }
}

fn map_id(raw: &RawProduct) -> Result<u64, VitrineError> {
    let candidate = [&raw.id, &raw.product_id, &raw.sku]
        .into_iter()
        .find_map(|field| field.as_ref())
        .ok_or_else(|| {
            VitrineError::Catalog(ErrorInfo::new("catalog.missing_id", "row carries no id field"))
        })?;
    dto::scalar_u64(candidate)
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            VitrineError::Catalog(
                ErrorInfo::new("catalog.bad_id", "row id is not a positive integer")
                    .with_context("id", candidate.to_string()),
            )
        })
}

fn pick_images(raw: &RawProduct) -> Vec<String> {
    let mut images = Vec::new();
    if let Some(rows) = &raw.images {
        for row in rows {
            if let Value::String(url) = row {
                let url = url.trim();
                if !url.is_empty() {
                    images.push(url.to_string());
                }
            }
        }
    }
    let single = [&raw.image_url, &raw.image, &raw.thumbnail]
        .into_iter()
        .find_map(|field| trimmed(field.as_deref()));
    if let Some(single) = single {
        if !images.iter().any(|existing| existing == single) {
            images.push(single.to_string());
        }
    }
    if images.is_empty() {
        images.push(PLACEHOLDER_IMAGE.to_string());
    }
    images
}

fn parse_created_at(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_timestamp(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&parsed));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return parsed
            .and_hms_opt(0, 0, 0)
            .map(|datetime| Utc.from_utc_datetime(&datetime));
    }
    None
}

fn trimmed(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}
