use vitrine_core::rng::SeededRng;
use vitrine_core::shuffle::{shuffle_in_place, shuffled_indices};

#[test]
fn shuffle_consumes_one_draw_per_swap() {
    let mut rng = SeededRng::from_text("draw-count");
    let mut mirror = rng.clone();

    let mut items: Vec<u32> = (0..8).collect();
    shuffle_in_place(&mut items, &mut rng);

    // A slice of n elements walks n - 1 positions.
    for _ in 0..7 {
        mirror.next_f64();
    }
    assert_eq!(rng, mirror);
}

#[test]
fn empty_slice_leaves_generator_untouched() {
    let mut rng = SeededRng::from_seed(5);
    let before = rng.clone();

    let mut empty: [u32; 0] = [];
    shuffle_in_place(&mut empty, &mut rng);

    assert_eq!(rng, before);
}

#[test]
fn singleton_slice_leaves_generator_untouched() {
    let mut rng = SeededRng::from_seed(5);
    let before = rng.clone();

    let mut one = [42u32];
    shuffle_in_place(&mut one, &mut rng);

    assert_eq!(one, [42]);
    assert_eq!(rng, before);
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = SeededRng::from_text("permutation");
    let mut items: Vec<u32> = (0..50).collect();
    shuffle_in_place(&mut items, &mut rng);

    let mut sorted = items.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..50).collect::<Vec<u32>>());
}

#[test]
fn same_seed_same_order() {
    let mut rng_a = SeededRng::from_seed(777);
    let mut rng_b = SeededRng::from_seed(777);

    let mut items_a: Vec<u32> = (0..20).collect();
    let mut items_b: Vec<u32> = (0..20).collect();
    shuffle_in_place(&mut items_a, &mut rng_a);
    shuffle_in_place(&mut items_b, &mut rng_b);

    assert_eq!(items_a, items_b);
}

#[test]
fn different_seeds_reorder_differently() {
    let mut rng_a = SeededRng::from_seed(777);
    let mut rng_b = SeededRng::from_seed(778);

    let mut items_a: Vec<u32> = (0..20).collect();
    let mut items_b: Vec<u32> = (0..20).collect();
    shuffle_in_place(&mut items_a, &mut rng_a);
    shuffle_in_place(&mut items_b, &mut rng_b);

    assert_ne!(items_a, items_b);
}

#[test]
fn shuffled_indices_cover_the_range() {
    let mut rng = SeededRng::from_text("indices");
    let indices = shuffled_indices(12, &mut rng);

    assert_eq!(indices.len(), 12);
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..12).collect::<Vec<usize>>());
}

#[test]
fn shuffled_indices_of_zero_is_empty() {
    let mut rng = SeededRng::from_text("indices");
    assert!(shuffled_indices(0, &mut rng).is_empty());
}
