//! Deterministic layout RNG and the string hash that seeds it.

use rand::RngCore;

/// FNV-1a hash of a string to a `u32` seed.
///
/// Hashes the string's UTF-16 code units in order, so the value is stable
/// across platforms and matches the storefront's historical seed derivation
/// for any text, including the Cyrillic labels that appear in real payloads.
/// The empty string hashes to the offset basis.
pub fn fnv1a32(text: &str) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for unit in text.encode_utf16() {
        hash ^= u32::from(unit);
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

/// Deterministic RNG used for merchandising layout decisions.
///
/// The generator keeps a single `u32` of state and yields floats in `[0, 1)`.
/// Two generators constructed from the same seed produce identical sequences;
/// that property is what keeps campaign tiles from jittering when a section
/// re-renders with unchanged inputs. All intermediate arithmetic is 32-bit
/// with silent wraparound.
///
/// This is a layout-determinism tool, not a statistical or cryptographic
/// generator. Never use it for anything security sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Creates a generator from a raw 32-bit seed.
    pub fn from_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Creates a generator seeded from [`fnv1a32`] of the provided text.
    pub fn from_text(text: &str) -> Self {
        Self::from_seed(fnv1a32(text))
    }

    /// Advances the state and returns the raw 32-bit output word.
    fn next_word(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(t | 1);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        r ^ (r >> 14)
    }

    /// Draws the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_word()) / 4_294_967_296.0
    }

    /// Draws a uniform index in `[0, bound)`.
    ///
    /// `bound` must be positive; the draw consumes exactly one output word.
    pub fn index_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index_below requires a positive bound");
        (self.next_f64() * bound as f64) as usize
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_word());
        let hi = u64::from(self.next_word());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
