use proptest::prelude::*;
use vitrine_catalog::{Campaign, CampaignTone};
use vitrine_core::seed::{SeedKey, SessionSeed};
use vitrine_merch::{
    assign_campaign_slots, assignment_digest, pick_seeded, ITEMS_PER_TILE, MIN_SECTION_FOR_TILES,
};

fn campaign(id: String) -> Campaign {
    Campaign {
        id,
        badge: "Акция".to_string(),
        title: "Скидки недели".to_string(),
        subtitle: "До -50% на избранное".to_string(),
        href: "/search".to_string(),
        tone: CampaignTone::Base,
    }
}

proptest! {
    #[test]
    fn assignments_stay_in_bounds(
        seed in 0u32..SessionSeed::BOUND,
        count in 0usize..220,
        pool_size in 0usize..9,
    ) {
        let campaigns: Vec<Campaign> =
            (1..=pool_size).map(|i| campaign(format!("cmp-{i}"))).collect();
        let key = SeedKey::section(SessionSeed::fixed(seed), "footwear", 0, count);
        let assignment = assign_campaign_slots(count, &campaigns, &key);

        if count < MIN_SECTION_FOR_TILES || campaigns.is_empty() {
            prop_assert!(assignment.is_empty());
        } else {
            let tiles = pool_size.min((count / ITEMS_PER_TILE).max(1));
            prop_assert_eq!(assignment.len(), tiles);
            for (slot, tile) in assignment.iter() {
                prop_assert!(slot < count);
                prop_assert!(campaigns.iter().any(|c| c.id == tile.id));
            }
        }

        let again = assign_campaign_slots(count, &campaigns, &key);
        prop_assert_eq!(&assignment, &again);
        prop_assert_eq!(assignment_digest(&assignment), assignment_digest(&again));
    }

    #[test]
    fn samples_are_duplicate_free_prefixes(
        seed in 0u32..SessionSeed::BOUND,
        len in 0usize..40,
        count in 0usize..50,
    ) {
        let source: Vec<usize> = (0..len).collect();
        let key = SeedKey::campaign(SessionSeed::fixed(seed), "clothes", 1, "cmp-1");
        let sample = pick_seeded(&source, count, &key);

        if len == 0 || count == 0 {
            prop_assert!(sample.is_empty());
        } else {
            prop_assert_eq!(sample.len(), count.min(len));
            let mut sorted = sample.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), sample.len());
            for value in &sample {
                prop_assert!(*value < len);
            }
        }

        prop_assert_eq!(sample, pick_seeded(&source, count, &key));
    }
}
