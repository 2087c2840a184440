//! Campaign and CMS promo payload normalization.
//!
//! Both payloads are editor-maintained JSON, so normalization is fail-soft:
//! a row missing its required copy is dropped with a warning and the rest of
//! the payload stands. Campaign tiles additionally cap their badge length
//! and sanitize their link target; CMS tiles require Cloudinary imagery.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::dto::{self, RawCampaign, RawCmsPromo, RawPromoSpace};

/// Maximum campaign rows kept from one promo space payload.
pub const CAMPAIGN_POOL_CAP: usize = 8;

/// Maximum badge length in characters.
const BADGE_CAP: usize = 20;

const DEFAULT_BADGE: &str = "Акция";
const DEFAULT_HREF: &str = "/search";

/// Required URL prefix for CMS promo imagery.
const CLOUDINARY_PREFIX: &str = "https://res.cloudinary.com/";

/// Visual tone of a campaign tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignTone {
    /// Discount campaign.
    Sale,
    /// Product drop announcement.
    Drop,
    /// Neutral tone.
    #[default]
    Base,
}

/// One normalized promo campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Stable campaign identifier.
    pub id: String,
    /// Short badge text, capped at 20 characters.
    pub badge: String,
    /// Campaign headline.
    pub title: String,
    /// Supporting copy.
    pub subtitle: String,
    /// Sanitized link target.
    pub href: String,
    /// Visual tone.
    pub tone: CampaignTone,
}

/// Normalized promo space shown above the home sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoSpace {
    /// Kicker line above the title.
    pub eyebrow: String,
    /// Space headline.
    pub title: String,
    /// Supporting copy.
    pub subtitle: String,
    /// Telegram channel link.
    pub telegram_url: String,
    /// Telegram call to action.
    pub telegram_text: String,
    /// Campaign pool, at most [`CAMPAIGN_POOL_CAP`] rows.
    pub campaigns: Vec<Campaign>,
}

impl Default for PromoSpace {
    fn default() -> Self {
        Self {
            eyebrow: "Промокоды".to_string(),
            title: "Билеты на скидку".to_string(),
            subtitle: "Здесь только общедоступные промокоды без лимита использований."
                .to_string(),
            telegram_url: "https://t.me/stagestore".to_string(),
            telegram_text: "В нашем Telegram ещё больше промокодов и быстрые анонсы акций."
                .to_string(),
            campaigns: Vec::new(),
        }
    }
}

impl PromoSpace {
    /// Normalizes a promo space payload, filling defaults for missing copy
    /// and dropping campaign rows without title or subtitle.
    pub fn from_payload(raw: &RawPromoSpace) -> Self {
        let defaults = PromoSpace::default();
        let campaigns = match &raw.campaigns {
            Some(rows) => {
                let mut campaigns: Vec<Campaign> = rows
                    .iter()
                    .enumerate()
                    .filter_map(|(index, row)| normalize_campaign(row, index))
                    .collect();
                campaigns.truncate(CAMPAIGN_POOL_CAP);
                campaigns
            }
            None => Vec::new(),
        };

        Self {
            eyebrow: field_or(&raw.eyebrow, &defaults.eyebrow),
            title: field_or(&raw.title, &defaults.title),
            subtitle: field_or(&raw.subtitle, &defaults.subtitle),
            telegram_url: field_or(&raw.telegram_url, &defaults.telegram_url),
            telegram_text: field_or(&raw.telegram_text, &defaults.telegram_text),
            campaigns,
        }
    }
}

fn normalize_campaign(row: &Value, index: usize) -> Option<Campaign> {
    let raw = RawCampaign::from_value(row);

    let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
    let subtitle = raw.subtitle.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() || subtitle.is_empty() {
        warn!("dropping campaign row {}: missing title or subtitle", index);
        return None;
    }

    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("campaign-{}", index + 1));

    let badge = match &raw.badge {
        Some(text) => text.trim().chars().take(BADGE_CAP).collect(),
        None => DEFAULT_BADGE.to_string(),
    };

    let href = raw.href.as_deref().map(str::trim).unwrap_or(DEFAULT_HREF);
    let href = if href.starts_with('/') || href.starts_with("http") {
        href.to_string()
    } else {
        DEFAULT_HREF.to_string()
    };

    let tone = match raw.tone.as_deref().map(str::trim).map(str::to_lowercase) {
        Some(tone) if tone == "sale" => CampaignTone::Sale,
        Some(tone) if tone == "drop" => CampaignTone::Drop,
        _ => CampaignTone::Base,
    };

    Some(Campaign {
        id,
        badge,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        href,
        tone,
    })
}

/// One validated CMS promo tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsPromo {
    /// Stable promo identifier.
    pub id: String,
    /// Admin-facing name, used for ordering ties.
    pub name: String,
    /// Small tag label on the tile.
    pub tag: String,
    /// Tile headline.
    pub title: String,
    /// Supporting copy.
    pub subtitle: String,
    /// Cloudinary background image URL.
    pub background_image_url: String,
    /// Cloudinary logo image URL, when valid.
    pub logo_image_url: Option<String>,
    /// Accent color override.
    pub accent_color: Option<String>,
    /// Lowercased brand search needles, at most 12.
    pub brand_queries: Vec<String>,
    /// Pinned positive product ids, at most 40.
    pub product_ids: Vec<u64>,
    /// Cap on shown products, clamped to 1..=20.
    pub max_items: usize,
    /// Section index the tile renders before.
    pub position: usize,
    /// Whether the tile is live; only an explicit `false` disables it.
    pub enabled: bool,
}

impl CmsPromo {
    /// Validates a batch of CMS promo rows.
    ///
    /// Invalid rows are dropped with a warning; duplicates by id keep the
    /// last occurrence; the result is ordered by `(position, name)`.
    pub fn from_rows(rows: &[Value]) -> Vec<CmsPromo> {
        let mut promos: Vec<CmsPromo> = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            let Some(promo) = normalize_cms_promo(row, index) else {
                continue;
            };
            match promos.iter_mut().find(|existing| existing.id == promo.id) {
                Some(existing) => *existing = promo,
                None => promos.push(promo),
            }
        }
        promos.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.name.cmp(&b.name))
        });
        promos
    }
}

fn normalize_cms_promo(row: &Value, index: usize) -> Option<CmsPromo> {
    let raw = RawCmsPromo::from_value(row);

    let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
    let subtitle = raw.subtitle.as_deref().map(str::trim).unwrap_or_default();
    let background = raw
        .background_image_url
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if title.is_empty() || subtitle.is_empty() || !is_cloudinary_url(background) {
        warn!(
            "dropping cms promo row {}: missing copy or non-Cloudinary background",
            index
        );
        return None;
    }

    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("promo-{}", index + 1));
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());
    let tag = raw
        .tag
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .unwrap_or("PROMO")
        .to_string();

    let max_items = raw
        .max_items
        .as_ref()
        .and_then(dto::scalar_i64)
        .unwrap_or(8)
        .clamp(1, 20) as usize;
    let position = raw
        .position
        .as_ref()
        .and_then(dto::scalar_i64)
        .unwrap_or(2)
        .max(0) as usize;

    let brand_queries = raw
        .brand_queries
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_str)
        .map(|needle| needle.trim().to_lowercase())
        .filter(|needle| !needle.is_empty())
        .take(12)
        .collect();

    let product_ids = raw
        .product_ids
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(dto::scalar_f64)
        .filter(|id| *id > 0.0)
        .map(|id| id.round() as u64)
        .take(40)
        .collect();

    Some(CmsPromo {
        id,
        name,
        tag,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        background_image_url: background.to_string(),
        logo_image_url: raw
            .logo_image_url
            .as_deref()
            .map(str::trim)
            .filter(|logo| is_cloudinary_url(logo))
            .map(str::to_string),
        accent_color: raw
            .accent_color
            .as_deref()
            .map(str::trim)
            .filter(|color| !color.is_empty())
            .map(str::to_string),
        brand_queries,
        product_ids,
        max_items,
        position,
        enabled: raw.enabled != Some(false),
    })
}

/// Whether the URL points at the approved Cloudinary host.
pub fn is_cloudinary_url(url: &str) -> bool {
    let url = url.trim();
    url.get(..CLOUDINARY_PREFIX.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(CLOUDINARY_PREFIX))
}

fn field_or(field: &Option<String>, fallback: &str) -> String {
    field
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
