use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use vitrine_catalog::{is_discounted, Product};

use crate::config::FeedConfig;

/// Badges reserved for system states; they never form editorial collections.
const SYSTEM_BADGES: [&str; 5] = ["NEW", "HIT", "SALE", "EXCLUSIVE", "PREMIUM"];

/// Rank 99 marks brands outside the signal list; their boost is zero.
const UNRANKED_BRAND: usize = 99;

/// One editorial collection grouped from a custom merch badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorialCollection {
    /// The badge text, used as the collection title.
    pub title: String,
    /// Products carrying the badge, in catalog order.
    pub items: Vec<Product>,
}

/// Aggregated brand interest signal, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSignal {
    /// Backend brand id the signal refers to.
    pub brand_id: i64,
}

/// Products currently considered discounted.
pub fn discounted(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|product| is_discounted(product))
        .cloned()
        .collect()
}

/// Groups products with custom badges into editorial collections.
///
/// System badges are skipped; the rest group by their exact trimmed text, in
/// catalog order, capped per collection and across collections by the config.
pub fn editorial_collections(products: &[Product], config: &FeedConfig) -> Vec<EditorialCollection> {
    let mut grouped: IndexMap<String, Vec<Product>> = IndexMap::new();
    for product in products {
        let Some(badge) = product.badge.as_deref() else {
            continue;
        };
        let badge = badge.trim();
        if badge.is_empty() || SYSTEM_BADGES.contains(&badge.to_uppercase().as_str()) {
            continue;
        }
        let bucket = grouped.entry(badge.to_string()).or_default();
        if bucket.len() < config.editorial_group_cap {
            bucket.push(product.clone());
        }
    }

    grouped
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(title, items)| EditorialCollection { title, items })
        .take(config.editorial_groups)
        .collect()
}

/// Merges promo product sources, deduped by id with first occurrence winning.
pub fn merge_promo_sources(
    primary: &[Product],
    personalized: &[Product],
    bestsellers: &[Product],
) -> Vec<Product> {
    let mut seen: HashSet<u64> = HashSet::new();
    let mut merged: Vec<Product> = Vec::new();
    for product in primary.iter().chain(personalized).chain(bestsellers) {
        if seen.insert(product.id) {
            merged.push(product.clone());
        }
    }
    merged
}

/// Ranks personalized recommendations for the "you may like" rail.
///
/// Score is `recommendation_score * 100` plus a brand boost of
/// `max(0, 60 - 8 * rank)` from the signal list and a freshness boost of
/// `max(0, 25 - index)` from the incoming order. The sort is stable, so equal
/// scores keep their order. An empty personalized list falls back to the
/// bestsellers, capped the same way.
pub fn rank_personalized(
    personalized: &[Product],
    bestsellers: &[Product],
    signals: &[BrandSignal],
    cap: usize,
) -> Vec<Product> {
    if personalized.is_empty() {
        return bestsellers.iter().take(cap).cloned().collect();
    }

    let mut ranks: HashMap<i64, usize> = HashMap::new();
    for (rank, signal) in signals.iter().enumerate() {
        if signal.brand_id > 0 {
            ranks.insert(signal.brand_id, rank);
        }
    }

    let mut scored: Vec<(f64, &Product)> = personalized
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let brand_rank = product
                .brand_id
                .and_then(|id| ranks.get(&id).copied())
                .unwrap_or(UNRANKED_BRAND);
            let brand_boost = (60 - 8 * brand_rank as i64).max(0) as f64;
            let fresh_boost = (25 - index as i64).max(0) as f64;
            let rec_score = product.recommendation_score.unwrap_or(0.0) * 100.0;
            (rec_score + brand_boost + fresh_boost, product)
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(cap)
        .map(|(_, product)| product.clone())
        .collect()
}
