#![deny(missing_docs)]
#![doc = "Seeding policy and deterministic layout primitives for the vitrine merchandising engine."]

pub mod errors;
pub mod rng;
pub mod seed;
pub mod shuffle;
mod schema;

pub use errors::{ErrorInfo, VitrineError};
pub use rng::{fnv1a32, SeededRng};
pub use schema::SchemaVersion;
pub use seed::{derive_store_key, SeedKey, SessionSeed};
pub use shuffle::{shuffle_in_place, shuffled_indices};
