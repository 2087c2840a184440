use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vitrine_catalog::Campaign;
use vitrine_core::seed::SeedKey;
use vitrine_core::shuffle::{shuffle_in_place, shuffled_indices};

/// Smallest section (in visible items) that receives campaign tiles.
pub const MIN_SECTION_FOR_TILES: usize = 4;

/// One campaign tile is placed per full group of this many items.
pub const ITEMS_PER_TILE: usize = 10;

/// Campaign tiles mapped to item slots within one section view.
///
/// Slots index into the section's visible item list; a tile at slot `i`
/// renders in place of (or alongside) the item at that position. The map is
/// ordered by slot so rendering walks it front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    slots: BTreeMap<usize, Campaign>,
}

impl SlotAssignment {
    /// Campaign assigned to the given slot, if any.
    pub fn get(&self, slot: usize) -> Option<&Campaign> {
        self.slots.get(&slot)
    }

    /// Number of assigned tiles.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the section received no tiles.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Assigned slot indices in ascending order.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.keys().copied()
    }

    /// Iterates `(slot, campaign)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Campaign)> {
        self.slots.iter().map(|(slot, campaign)| (*slot, campaign))
    }
}

/// Assigns campaign tiles to item slots for one section view.
///
/// Sections with fewer than [`MIN_SECTION_FOR_TILES`] visible items and empty
/// pools get no tiles. Otherwise the tile count is one per full
/// [`ITEMS_PER_TILE`] items, at least one and never more than the pool size.
///
/// A single generator derived from the key first shuffles the slot indices,
/// then a copy of the campaign pool; tile `i` in draw order takes campaign
/// `i % pool`. The result is a pure function of `(count, campaigns, key)`,
/// so an unchanged view keeps its layout across re-renders.
pub fn assign_campaign_slots(
    count: usize,
    campaigns: &[Campaign],
    key: &SeedKey,
) -> SlotAssignment {
    let mut assignment = SlotAssignment::default();
    if count < MIN_SECTION_FOR_TILES || campaigns.is_empty() {
        return assignment;
    }

    let tiles = campaigns.len().min((count / ITEMS_PER_TILE).max(1));
    let mut rng = key.rng();
    let indices = shuffled_indices(count, &mut rng);
    let mut pool = campaigns.to_vec();
    shuffle_in_place(&mut pool, &mut rng);

    for (ordinal, slot) in indices.into_iter().take(tiles).enumerate() {
        assignment
            .slots
            .insert(slot, pool[ordinal % pool.len()].clone());
    }
    assignment
}
