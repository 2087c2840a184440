use vitrine_core::seed::SeedKey;
use vitrine_core::shuffle::shuffle_in_place;

/// Draws up to `count` items from `source` in seeded shuffle order.
///
/// Shuffles a copy of the whole source with the key's generator and keeps the
/// first `min(count, len)` items, so the draw is without replacement and the
/// same key always re-draws the same sample. Empty sources and a zero count
/// yield an empty vec.
pub fn pick_seeded<T: Clone>(source: &[T], count: usize, key: &SeedKey) -> Vec<T> {
    if source.is_empty() || count == 0 {
        return Vec::new();
    }
    let mut pool = source.to_vec();
    let mut rng = key.rng();
    shuffle_in_place(&mut pool, &mut rng);
    pool.truncate(count);
    pool
}
