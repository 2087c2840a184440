//! Seed composition and stable key derivation.
//!
//! Determinism in vitrine comes entirely from seeds, never from memoization.
//! A caller composes a [`SeedKey`] from stable view identifiers (the session
//! seed, a category key, a section index and either the visible item count or
//! a campaign id); the same logical view therefore always re-derives the same
//! generator. Folding a per-render value such as a timestamp into a key
//! reintroduces the layout jitter the whole scheme exists to prevent.

use rand::Rng;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

use crate::rng::{fnv1a32, SeededRng};

/// Session-scoped random seed, drawn once when a browsing session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSeed(u32);

impl SessionSeed {
    /// Exclusive upper bound for freshly drawn session seeds.
    pub const BOUND: u32 = 1_000_000_000;

    /// Draws a new session seed from the thread RNG.
    pub fn random() -> Self {
        Self(rand::thread_rng().gen_range(0..Self::BOUND))
    }

    /// Wraps a fixed value, for tests and replayed sessions.
    pub fn fixed(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw seed value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// A composed seed string identifying one deterministic layout decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedKey(String);

impl SeedKey {
    /// Key for a section's campaign slot assignment.
    ///
    /// `visible` is the number of items currently shown in the section, so
    /// paging deeper re-derives a fresh assignment while an unchanged view
    /// keeps its layout.
    pub fn section(
        seed: SessionSeed,
        category_key: &str,
        section_index: usize,
        visible: usize,
    ) -> Self {
        Self(format!(
            "{}-{}-{}-{}",
            seed.value(),
            category_key,
            section_index,
            visible
        ))
    }

    /// Key for one campaign's showcase sample within a section.
    pub fn campaign(
        seed: SessionSeed,
        category_key: &str,
        section_index: usize,
        campaign_id: &str,
    ) -> Self {
        Self(format!(
            "{}-{}-{}-{}",
            seed.value(),
            category_key,
            section_index,
            campaign_id
        ))
    }

    /// Wraps a caller-composed key verbatim.
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the composed key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hashes the key to its 32-bit generator seed.
    pub fn hash(&self) -> u32 {
        fnv1a32(&self.0)
    }

    /// Builds the deterministic generator for this key.
    pub fn rng(&self) -> SeededRng {
        SeededRng::from_seed(self.hash())
    }
}

/// Derives a stable `u64` store key from a namespace and compound parts.
///
/// Uses SipHash-1-3 with fixed zero keys, so the value is identical across
/// platforms and runs. Each part is length-prefixed to keep the framing
/// unambiguous.
pub fn derive_store_key(namespace: &str, parts: &[&str]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(namespace.len() as u64);
    hasher.write(namespace.as_bytes());
    for part in parts {
        hasher.write_u64(part.len() as u64);
        hasher.write(part.as_bytes());
    }
    hasher.finish()
}
