#![deny(missing_docs)]
#![doc = include_str!("../docs/placement-api.md")]

//! Deterministic merchandising placement for vitrine home feeds.

mod digest;
mod interleave;
mod sample;
mod showcase;

pub use digest::assignment_digest;
pub use interleave::{
    assign_campaign_slots, SlotAssignment, ITEMS_PER_TILE, MIN_SECTION_FOR_TILES,
};
pub use sample::pick_seeded;
pub use showcase::{build_campaign_showcases, select_promo_products, showcase_pool};
