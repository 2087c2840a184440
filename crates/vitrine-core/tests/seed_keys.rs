use vitrine_core::seed::{derive_store_key, SeedKey, SessionSeed};

#[test]
fn section_key_composes_in_declared_order() {
    let seed = SessionSeed::fixed(123_456_789);
    let key = SeedKey::section(seed, "footwear", 0, 20);
    assert_eq!(key.as_str(), "123456789-footwear-0-20");
}

#[test]
fn campaign_key_ends_with_campaign_id() {
    let seed = SessionSeed::fixed(42);
    let key = SeedKey::campaign(seed, "clothes", 3, "cmp-9");
    assert_eq!(key.as_str(), "42-clothes-3-cmp-9");
}

#[test]
fn visible_count_changes_the_key() {
    let seed = SessionSeed::fixed(7);
    let page_one = SeedKey::section(seed, "bags", 1, 20);
    let page_two = SeedKey::section(seed, "bags", 1, 50);
    assert_ne!(page_one.hash(), page_two.hash());
}

#[test]
fn same_key_builds_identical_generators() {
    let seed = SessionSeed::fixed(9);
    let mut rng_a = SeedKey::section(seed, "all", 2, 20).rng();
    let mut rng_b = SeedKey::section(seed, "all", 2, 20).rng();

    for _ in 0..10 {
        assert_eq!(rng_a.next_f64(), rng_b.next_f64());
    }
}

#[test]
fn raw_key_round_trips_text() {
    let key = SeedKey::raw("55-all-0-20");
    assert_eq!(key.as_str(), "55-all-0-20");
    assert_eq!(key.hash(), SeedKey::raw("55-all-0-20").hash());
}

#[test]
fn random_session_seed_respects_bound() {
    for _ in 0..100 {
        assert!(SessionSeed::random().value() < SessionSeed::BOUND);
    }
}

#[test]
fn store_key_is_stable_across_calls() {
    let a = derive_store_key("preview", &["home", "footwear"]);
    let b = derive_store_key("preview", &["home", "footwear"]);
    assert_eq!(a, b);
}

#[test]
fn store_key_framing_resists_part_splits() {
    // "ab"+"c" and "a"+"bc" concatenate identically; the length prefix
    // must still keep them apart.
    let split_a = derive_store_key("ns", &["ab", "c"]);
    let split_b = derive_store_key("ns", &["a", "bc"]);
    assert_ne!(split_a, split_b);
}

#[test]
fn store_key_namespace_separates_values() {
    let preview = derive_store_key("preview", &["home"]);
    let session = derive_store_key("session", &["home"]);
    assert_ne!(preview, session);
}
