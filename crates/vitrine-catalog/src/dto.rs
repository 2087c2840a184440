//! Permissive wire DTOs for upstream storefront payloads.
//!
//! These structs accept product, campaign and CMS promo payloads the way the
//! backends emit them today: every field optional, unknown fields ignored,
//! numeric fields tolerated as strings. Nothing here validates; the strict
//! typed model lives in [`crate::product`] and [`crate::promo`].

use serde::Deserialize;
use serde_json::Value;

/// One product row as served by the products endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProduct {
    /// Primary identifier.
    pub id: Option<Value>,
    /// Legacy identifier alias.
    pub product_id: Option<Value>,
    /// Stock keeping unit, used as a last-resort identifier.
    pub sku: Option<Value>,
    /// Display name.
    pub name: Option<String>,
    /// Display name alias.
    pub title: Option<String>,
    /// Display name alias of last resort.
    pub label: Option<String>,
    /// Current price in rubles.
    pub price: Option<Value>,
    /// Minimum variant price in rubles.
    pub min_price: Option<Value>,
    /// Legacy price alias.
    pub amount: Option<Value>,
    /// Pre-discount price.
    pub old_price: Option<Value>,
    /// Pre-discount price alias.
    pub original_price: Option<Value>,
    /// Gallery image URLs.
    pub images: Option<Vec<Value>>,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Legacy single-image alias.
    pub image: Option<String>,
    /// Legacy thumbnail alias.
    pub thumbnail: Option<String>,
    /// Canonical category slug from the database.
    pub category_db_slug: Option<String>,
    /// Category slug alias.
    pub category_slug: Option<String>,
    /// Category as a slug, a backend id or a relation object.
    pub category: Option<Value>,
    /// Legacy main-category alias.
    pub main: Option<Value>,
    /// Legacy type field that sometimes carries the category.
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    /// Numeric backend category id.
    pub category_id: Option<Value>,
    /// Subcategory slug from the database.
    pub sub_category_slug: Option<String>,
    /// Subcategory alias.
    pub subcategory: Option<String>,
    /// Subcategory alias.
    pub sub_category: Option<String>,
    /// Subcategory alias of last resort.
    pub sub: Option<String>,
    /// Brand as a plain string or a relation object.
    pub brand: Option<RawBrandField>,
    /// Prisma-cased brand relation.
    #[serde(rename = "Brand")]
    pub brand_relation: Option<RawBrandField>,
    /// Brand name alias.
    pub brand_name: Option<String>,
    /// Brand list for multi-brand rows.
    pub brands: Option<Vec<Value>>,
    /// Brand id used by recommendation ranking.
    pub brand_id: Option<Value>,
    /// Merchandising badge text.
    pub badge: Option<String>,
    /// Premium flag; premium rows stay out of the home catalog.
    pub premium: Option<bool>,
    /// Premium flag alias.
    pub is_premium: Option<bool>,
    /// Explicit novelty flag.
    pub is_new: Option<bool>,
    /// Gender attribution.
    pub gender: Option<String>,
    /// Gender alias.
    pub sex: Option<String>,
    /// Gender alias.
    pub target_gender: Option<String>,
    /// Creation timestamp, RFC 3339 text or epoch milliseconds.
    pub created_at: Option<Value>,
    /// Units left in stock.
    pub stock: Option<Value>,
    /// Stock alias.
    pub quantity: Option<Value>,
    /// Popularity score used by the default sort.
    pub popularity: Option<Value>,
    /// Recommendation envelope attached by the personalization endpoint.
    pub recommendation: Option<RawRecommendation>,
    /// Long description.
    pub description: Option<String>,
    /// Description alias.
    pub short_description: Option<String>,
    /// Description alias of last resort.
    pub subtitle: Option<String>,
    /// Size rows that may carry per-size prices.
    pub sizes: Option<Value>,
    /// Variant rows that may carry per-variant prices.
    pub variants: Option<Value>,
}

impl RawProduct {
    /// First present category candidate, stringified the way the upstream
    /// clients do it.
    ///
    /// Precedence: database slug, slug alias, relation slug, legacy `main`,
    /// the bare `category` value, legacy `type`, numeric `categoryId`. The
    /// first present candidate wins even when it stringifies to something
    /// the normalizer cannot place.
    pub fn raw_category(&self) -> Option<String> {
        if let Some(slug) = &self.category_db_slug {
            return Some(slug.clone());
        }
        if let Some(slug) = &self.category_slug {
            return Some(slug.clone());
        }
        if let Some(slug) = self.category.as_ref().and_then(|value| value.get("slug")) {
            return Some(loose_string(slug));
        }
        for candidate in [&self.main, &self.category, &self.kind, &self.category_id] {
            if let Some(value) = candidate {
                return Some(loose_string(value));
            }
        }
        None
    }

    /// First present subcategory candidate.
    pub fn raw_subcategory(&self) -> Option<&str> {
        [
            &self.sub_category_slug,
            &self.subcategory,
            &self.sub_category,
            &self.sub,
        ]
        .into_iter()
        .find_map(|field| field.as_deref())
    }
}

/// Brand field as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawBrandField {
    /// Plain brand name.
    Text(String),
    /// Relation object carrying naming fields.
    Relation(RawBrandRelation),
    /// Anything else; ignored by resolution.
    Other(Value),
}

/// Brand relation object shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBrandRelation {
    /// Relation display name.
    pub name: Option<String>,
    /// Display name alias.
    pub title: Option<String>,
    /// Display name alias.
    pub label: Option<String>,
    /// URL slug, used as the last naming fallback.
    pub slug: Option<String>,
}

impl RawBrandRelation {
    /// First non-empty naming field, trimmed.
    pub fn display_name(&self) -> Option<&str> {
        [&self.name, &self.title, &self.label, &self.slug]
            .into_iter()
            .find_map(|field| {
                field
                    .as_deref()
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
            })
    }
}

/// Recommendation envelope attached to personalized rows.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecommendation {
    /// Model score for the recommendation.
    pub score: Option<Value>,
}

/// One campaign row from the promo space payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCampaign {
    /// Stable campaign identifier.
    pub id: Option<String>,
    /// Short badge text shown on the tile.
    pub badge: Option<String>,
    /// Campaign headline.
    pub title: Option<String>,
    /// Supporting copy.
    pub subtitle: Option<String>,
    /// Target link.
    pub href: Option<String>,
    /// Visual tone hint.
    pub tone: Option<String>,
}

impl RawCampaign {
    /// Reads one row leniently, keeping string fields and dropping the rest.
    pub fn from_value(row: &Value) -> Self {
        Self {
            id: string_field(row, "id"),
            badge: string_field(row, "badge"),
            title: string_field(row, "title"),
            subtitle: string_field(row, "subtitle"),
            href: string_field(row, "href"),
            tone: string_field(row, "tone"),
        }
    }
}

/// Promo space payload grouping the public promo campaigns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPromoSpace {
    /// Kicker line above the title.
    pub eyebrow: Option<String>,
    /// Space headline.
    pub title: Option<String>,
    /// Supporting copy.
    pub subtitle: Option<String>,
    /// Telegram channel link.
    pub telegram_url: Option<String>,
    /// Telegram call to action.
    pub telegram_text: Option<String>,
    /// Campaign rows, normalized individually.
    pub campaigns: Option<Vec<Value>>,
}

/// One CMS promo row before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCmsPromo {
    /// Stable promo identifier.
    pub id: Option<String>,
    /// Admin-facing name.
    pub name: Option<String>,
    /// Small tag label on the tile.
    pub tag: Option<String>,
    /// Tile headline.
    pub title: Option<String>,
    /// Supporting copy.
    pub subtitle: Option<String>,
    /// Background image URL; must be a Cloudinary asset.
    pub background_image_url: Option<String>,
    /// Optional logo image URL; kept only when it is a Cloudinary asset.
    pub logo_image_url: Option<String>,
    /// Accent color override.
    pub accent_color: Option<String>,
    /// Brand search needles.
    pub brand_queries: Option<Vec<Value>>,
    /// Explicitly pinned product ids.
    pub product_ids: Option<Vec<Value>>,
    /// Cap on the number of shown products.
    pub max_items: Option<Value>,
    /// Section index the tile renders before.
    pub position: Option<Value>,
    /// Whether the tile is live.
    pub enabled: Option<bool>,
}

impl RawCmsPromo {
    /// Reads one row leniently; mistyped fields fall back to their defaults.
    pub fn from_value(row: &Value) -> Self {
        Self {
            id: string_field(row, "id"),
            name: string_field(row, "name"),
            tag: string_field(row, "tag"),
            title: string_field(row, "title"),
            subtitle: string_field(row, "subtitle"),
            background_image_url: string_field(row, "backgroundImageUrl"),
            logo_image_url: string_field(row, "logoImageUrl"),
            accent_color: string_field(row, "accentColor"),
            brand_queries: array_field(row, "brandQueries"),
            product_ids: array_field(row, "productIds"),
            max_items: row.get("maxItems").cloned(),
            position: row.get("position").cloned(),
            enabled: row.get("enabled").and_then(Value::as_bool),
        }
    }
}

fn string_field(row: &Value, name: &str) -> Option<String> {
    row.get(name).and_then(Value::as_str).map(str::to_string)
}

fn array_field(row: &Value, name: &str) -> Option<Vec<Value>> {
    row.get(name).and_then(Value::as_array).cloned()
}

/// Stringifies a scalar the way `String(v)` does for the shapes that occur
/// in practice; objects and arrays collapse to an unplaceable empty string.
fn loose_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn scalar_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

pub(crate) fn scalar_i64(value: &Value) -> Option<i64> {
    scalar_f64(value).map(|number| number.round() as i64)
}

pub(crate) fn scalar_u64(value: &Value) -> Option<u64> {
    if let Value::Number(number) = value {
        if let Some(id) = number.as_u64() {
            return Some(id);
        }
    }
    scalar_f64(value)
        .filter(|number| *number >= 0.0 && number.fract() == 0.0)
        .map(|number| number as u64)
}
