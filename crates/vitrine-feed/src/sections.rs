use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use vitrine_catalog::{Category, Product};

use crate::config::FeedConfig;

/// Sort order applied to the catalog before grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// By popularity when the data carries it, source order otherwise.
    #[default]
    Popular,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

/// Sorts products in place according to the sort key.
///
/// `Popular` only reorders when the first item carries a popularity value;
/// payloads without the field keep their source order. All sorts are stable,
/// so ties preserve the incoming order.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::PriceAsc => products.sort_by_key(|product| product.price),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Popular => {
            let sortable = products
                .first()
                .map_or(false, |product| product.popularity.is_some());
            if sortable {
                products.sort_by(|a, b| {
                    let left = b.popularity.unwrap_or(0.0);
                    let right = a.popularity.unwrap_or(0.0);
                    left.total_cmp(&right)
                });
            }
        }
    }
}

/// Groups the home catalog by canonical category key.
///
/// Premium items are excluded here; promo pools elsewhere still see them.
/// Group order follows first appearance in the input.
pub fn group_by_category(products: &[Product]) -> IndexMap<String, Vec<Product>> {
    let mut groups: IndexMap<String, Vec<Product>> = IndexMap::new();
    for product in products {
        if product.premium {
            continue;
        }
        groups
            .entry(product.category.key().to_string())
            .or_default()
            .push(product.clone());
    }
    groups
}

/// Orders section keys: canonical categories first, the rest alphabetically.
pub fn section_order(groups: &IndexMap<String, Vec<Product>>) -> Vec<String> {
    let mut order: Vec<String> = Category::CANONICAL_ORDER
        .iter()
        .filter(|key| groups.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    let mut rest: Vec<String> = groups
        .keys()
        .filter(|key| !Category::CANONICAL_ORDER.contains(&key.as_str()))
        .cloned()
        .collect();
    rest.sort();
    order.extend(rest);
    order
}

/// Per-category visible item counts driving "show more" pagination.
///
/// Stored counts are clamped on read, so totals shrinking under filters or
/// growing back never leave a stale count out of range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleCounts {
    counts: BTreeMap<String, usize>,
}

impl VisibleCounts {
    /// Visible count for a section, clamped into `[min(initial, total), total]`.
    pub fn visible_for(&self, category: &str, total: usize, config: &FeedConfig) -> usize {
        let floor = config.initial_visible.min(total);
        self.counts
            .get(category)
            .copied()
            .unwrap_or(floor)
            .max(floor)
            .min(total)
    }

    /// Reveals one more page for the section.
    pub fn show_more(&mut self, category: &str, total: usize, config: &FeedConfig) {
        let current = self.visible_for(category, total, config);
        let next = (current + config.load_step).min(total);
        self.counts.insert(category.to_string(), next);
    }

    /// Collapses the section back to its initial page.
    pub fn show_less(&mut self, category: &str, total: usize, config: &FeedConfig) {
        self.counts
            .insert(category.to_string(), config.initial_visible.min(total));
    }

    /// Drops counts for categories no longer present.
    pub fn retain(&mut self, keys: &[String]) {
        self.counts.retain(|key, _| keys.contains(key));
    }

    /// Clears all stored counts.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
