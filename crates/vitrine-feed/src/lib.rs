//! Home feed assembly, pagination state and session handling for vitrine.

mod assemble;
mod collections;
mod config;
mod sections;
mod session;

pub use assemble::{
    build_home_feed, CmsPromoRail, FeedInputs, FeedInsert, HomeFeed, SectionView,
};
pub use collections::{
    discounted, editorial_collections, merge_promo_sources, rank_personalized, BrandSignal,
    EditorialCollection,
};
pub use config::FeedConfig;
pub use sections::{group_by_category, section_order, sort_products, SortKey, VisibleCounts};
pub use session::SessionState;
