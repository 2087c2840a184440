use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vitrine_catalog::{Category, CmsPromo, Product, PromoSpace};
use vitrine_core::SeedKey;
use vitrine_merch::{
    assign_campaign_slots, assignment_digest, build_campaign_showcases, select_promo_products,
    showcase_pool, SlotAssignment,
};

use crate::collections::{
    discounted, editorial_collections, merge_promo_sources, rank_personalized, BrandSignal,
    EditorialCollection,
};
use crate::config::FeedConfig;
use crate::sections::{group_by_category, section_order, sort_products, SortKey};
use crate::session::SessionState;

/// Everything the assembler reads besides config and session state.
#[derive(Debug, Clone, Copy)]
pub struct FeedInputs<'a> {
    /// Mapped catalog, premium items included.
    pub products: &'a [Product],
    /// Normalized promo space.
    pub promo_space: &'a PromoSpace,
    /// Validated CMS promo tiles.
    pub cms_promos: &'a [CmsPromo],
    /// Personalized recommendations, strongest first.
    pub personalized: &'a [Product],
    /// Storewide bestsellers.
    pub bestsellers: &'a [Product],
    /// Aggregated brand interest signals, strongest first.
    pub brand_signals: &'a [BrandSignal],
    /// Catalog sort applied before grouping.
    pub sort: SortKey,
}

/// One rendered home section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    /// Canonical category key.
    pub category: String,
    /// Display title: the category label when known, the key otherwise.
    pub title: String,
    /// In-page anchor id, for categories with a backend id.
    pub anchor: Option<String>,
    /// Visible products, already paginated.
    pub products: Vec<Product>,
    /// Campaign tiles assigned to item slots.
    pub campaign_slots: SlotAssignment,
    /// Showcase samples keyed by campaign id, in pool order.
    pub showcases: IndexMap<String, Vec<Product>>,
    /// Whether "show more" has items left to reveal.
    pub has_more: bool,
    /// Whether the section is expanded past its initial page.
    pub can_show_less: bool,
    /// Digest of the slot assignment, for layout agreement checks.
    pub digest: String,
}

/// A CMS promo tile with its selected products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsPromoRail {
    /// The tile configuration.
    pub promo: CmsPromo,
    /// Products selected for the tile.
    pub items: Vec<Product>,
}

/// A rail or block rendered between sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FeedInsert {
    /// Storewide bestsellers rail.
    Bestsellers {
        /// Section index the rail renders before.
        before_section: usize,
        /// Rail products.
        items: Vec<Product>,
    },
    /// Editorial collection block.
    Editorial {
        /// Section index the block renders before.
        before_section: usize,
        /// The featured collection, when one exists.
        collection: Option<EditorialCollection>,
    },
    /// Personalized "you may like" rail.
    Personalized {
        /// Section index the rail renders before.
        before_section: usize,
        /// Rail products.
        items: Vec<Product>,
    },
    /// CMS-configured promo tile.
    CmsPromo {
        /// Section index the tile renders before.
        before_section: usize,
        /// The tile and its products.
        rail: CmsPromoRail,
    },
}

/// The assembled home feed for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    /// Promocode space block shown above the sections.
    pub promo_rail: PromoSpace,
    /// Category sections in display order.
    pub sections: Vec<SectionView>,
    /// Rails and blocks interleaved between sections.
    pub inserts: Vec<FeedInsert>,
}

/// Assembles the home feed for the current session.
///
/// The result is a pure function of the inputs, the config and the session's
/// seed and pagination state: rebuilding with the same values yields an
/// identical feed, campaign slots and showcase samples included.
pub fn build_home_feed(
    inputs: &FeedInputs<'_>,
    config: &FeedConfig,
    session: &mut SessionState,
) -> HomeFeed {
    let seed = session.seed();

    let mut sorted: Vec<Product> = inputs.products.to_vec();
    sort_products(&mut sorted, inputs.sort);
    let groups = group_by_category(&sorted);
    let order = section_order(&groups);
    session.visible_counts_mut().retain(&order);

    let global_discounted = discounted(inputs.products);
    let pool_cap = config
        .campaign_pool_cap
        .min(inputs.promo_space.campaigns.len());
    let campaign_pool = &inputs.promo_space.campaigns[..pool_cap];

    let editorial = editorial_collections(inputs.products, config);
    let personalized_rail = rank_personalized(
        inputs.personalized,
        inputs.bestsellers,
        inputs.brand_signals,
        config.recommendation_cap,
    );
    let promo_source =
        merge_promo_sources(inputs.products, inputs.personalized, inputs.bestsellers);

    let mut rails_by_position: IndexMap<usize, Vec<CmsPromoRail>> = IndexMap::new();
    for promo in inputs.cms_promos.iter().filter(|promo| promo.enabled) {
        let items = select_promo_products(promo, &promo_source);
        rails_by_position
            .entry(promo.position)
            .or_default()
            .push(CmsPromoRail {
                promo: promo.clone(),
                items,
            });
    }

    let mut sections: Vec<SectionView> = Vec::with_capacity(order.len());
    let mut inserts: Vec<FeedInsert> = Vec::new();

    for (section_index, key) in order.iter().enumerate() {
        let items = &groups[key.as_str()];
        let total = items.len();
        let visible = session.visible_counts().visible_for(key, total, config);
        let display: Vec<Product> = items[..visible].to_vec();

        if section_index == 1 {
            inserts.push(FeedInsert::Bestsellers {
                before_section: section_index,
                items: inputs.bestsellers.to_vec(),
            });
        }
        if let Some(rails) = rails_by_position.get(&section_index) {
            for rail in rails {
                inserts.push(FeedInsert::CmsPromo {
                    before_section: section_index,
                    rail: rail.clone(),
                });
            }
        }
        if section_index == 3 {
            inserts.push(FeedInsert::Editorial {
                before_section: section_index,
                collection: editorial.first().cloned(),
            });
        }
        if section_index == 4 {
            inserts.push(FeedInsert::Personalized {
                before_section: section_index,
                items: personalized_rail.clone(),
            });
        }

        let slot_key = SeedKey::section(seed, key, section_index, visible);
        let campaign_slots = assign_campaign_slots(display.len(), campaign_pool, &slot_key);
        let digest = assignment_digest(&campaign_slots);

        let section_discounted = discounted(items);
        let sample_pool = showcase_pool(items, &section_discounted, &global_discounted);
        let showcases = build_campaign_showcases(
            campaign_pool,
            sample_pool,
            seed,
            key,
            section_index,
            config.showcase_size,
        );

        let category = Category::parse(key);
        sections.push(SectionView {
            category: key.clone(),
            title: category
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| key.clone()),
            anchor: category.backend_id().map(|id| format!("category-{id}")),
            products: display,
            campaign_slots,
            showcases,
            has_more: total > visible,
            can_show_less: visible > config.initial_visible,
            digest,
        });
    }

    debug!(
        "assembled home feed: {} sections, {} inserts, seed {}",
        sections.len(),
        inserts.len(),
        seed.value()
    );

    HomeFeed {
        promo_rail: inputs.promo_space.clone(),
        sections,
        inserts,
    }
}
