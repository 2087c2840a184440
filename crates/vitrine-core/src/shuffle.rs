//! Seeded Fisher-Yates shuffle.

use crate::rng::SeededRng;

/// Shuffles the slice in place using the provided generator.
///
/// Iterates from the last index down to 1, drawing `j = floor(draw * (i + 1))`
/// and swapping. Consumes exactly `len - 1` draws; slices of length 0 or 1
/// consume none. Every permutation is reachable up to the period of the
/// underlying generator.
pub fn shuffle_in_place<T>(items: &mut [T], rng: &mut SeededRng) {
    for i in (1..items.len()).rev() {
        let j = rng.index_below(i + 1);
        items.swap(i, j);
    }
}

/// Builds `[0, count)` and shuffles it with the provided generator.
pub fn shuffled_indices(count: usize, rng: &mut SeededRng) -> Vec<usize> {
    let mut indexes: Vec<usize> = (0..count).collect();
    shuffle_in_place(&mut indexes, rng);
    indexes
}
