use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use vitrine_catalog::{Campaign, CmsPromo, Product};
use vitrine_core::seed::{SeedKey, SessionSeed};

use crate::sample::pick_seeded;

/// Picks the pool a section's campaign showcases sample from.
///
/// Prefers the section's own discounted items, then the storewide discounted
/// list, then the section items themselves.
pub fn showcase_pool<'a>(
    section_items: &'a [Product],
    section_discounted: &'a [Product],
    global_discounted: &'a [Product],
) -> &'a [Product] {
    if !section_discounted.is_empty() {
        section_discounted
    } else if !global_discounted.is_empty() {
        global_discounted
    } else {
        section_items
    }
}

/// Samples a product showcase for every campaign in the pool.
///
/// Returns showcases keyed by campaign id, in pool order. Each campaign
/// derives its own generator from the session seed, the category, the section
/// index and its id, so two campaigns in the same section draw independent
/// samples.
pub fn build_campaign_showcases(
    campaigns: &[Campaign],
    pool: &[Product],
    seed: SessionSeed,
    category_key: &str,
    section_index: usize,
    sample_size: usize,
) -> IndexMap<String, Vec<Product>> {
    let mut showcases = IndexMap::with_capacity(campaigns.len());
    for campaign in campaigns {
        let key = SeedKey::campaign(seed, category_key, section_index, &campaign.id);
        showcases.insert(campaign.id.clone(), pick_seeded(pool, sample_size, &key));
    }
    showcases
}

/// Selects the product rows for one CMS promo tile.
///
/// Pinned `product_ids` come first, in configured order and deduped; brand
/// query needles then fill the remainder until `max_items`, matching against
/// the lowercased brand and product name. The result is capped at
/// `max(1, max_items)`.
pub fn select_promo_products(promo: &CmsPromo, source: &[Product]) -> Vec<Product> {
    let mut by_id: HashMap<u64, &Product> = HashMap::with_capacity(source.len());
    for product in source {
        by_id.entry(product.id).or_insert(product);
    }

    let mut seen: HashSet<u64> = HashSet::new();
    let mut rows: Vec<Product> = Vec::new();

    for id in &promo.product_ids {
        let Some(product) = by_id.get(id) else {
            continue;
        };
        if seen.insert(product.id) {
            rows.push((*product).clone());
        }
    }

    if rows.len() < promo.max_items && !promo.brand_queries.is_empty() {
        let needles: Vec<&str> = promo
            .brand_queries
            .iter()
            .map(String::as_str)
            .filter(|needle| !needle.is_empty())
            .collect();
        for product in source {
            if rows.len() >= promo.max_items {
                break;
            }
            if seen.contains(&product.id) {
                continue;
            }
            let brand = product
                .brand
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            let name = product.name.to_lowercase();
            if needles
                .iter()
                .any(|needle| brand.contains(needle) || name.contains(needle))
            {
                seen.insert(product.id);
                rows.push(product.clone());
            }
        }
    }

    rows.truncate(promo.max_items.max(1));
    rows
}
