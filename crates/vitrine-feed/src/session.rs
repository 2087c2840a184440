use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vitrine_core::{derive_store_key, ErrorInfo, SchemaVersion, SessionSeed, VitrineError};

use crate::sections::VisibleCounts;

const PREVIEW_NAMESPACE: &str = "gallery-preview";

/// Browsing-session state owned by the caller and passed by handle.
///
/// Holds the layout seed, per-section pagination and per-gallery preview
/// indices. The seed is drawn on first access and kept until [`reset`];
/// nothing here expires implicitly, so a feed rebuilt mid-session keeps its
/// layout.
///
/// [`reset`]: SessionState::reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    seed: Option<SessionSeed>,
    visible: VisibleCounts,
    preview: BTreeMap<u64, usize>,
}

#[derive(Serialize, Deserialize)]
struct SessionSnapshot {
    schema: SchemaVersion,
    seed: Option<SessionSeed>,
    visible: VisibleCounts,
    preview: BTreeMap<u64, usize>,
}

impl SessionState {
    /// Snapshot schema; restores accept any snapshot with the same major.
    pub const SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

    /// Creates an empty session with no seed drawn yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with a fixed seed, for tests and replays.
    pub fn with_seed(seed: SessionSeed) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// The session's layout seed, drawn on first access.
    pub fn seed(&mut self) -> SessionSeed {
        *self.seed.get_or_insert_with(SessionSeed::random)
    }

    /// Per-section pagination counts.
    pub fn visible_counts(&self) -> &VisibleCounts {
        &self.visible
    }

    /// Mutable access to the pagination counts.
    pub fn visible_counts_mut(&mut self) -> &mut VisibleCounts {
        &mut self.visible
    }

    /// Stored preview image index for a product gallery, if any.
    ///
    /// The key covers the product id and its image list, so a gallery whose
    /// images change reads as fresh and starts at the cover again.
    pub fn preview_index(&self, product_id: u64, images: &[String]) -> Option<usize> {
        self.preview
            .get(&gallery_store_key(product_id, images))
            .copied()
    }

    /// Remembers the preview image index for a product gallery.
    pub fn set_preview_index(&mut self, product_id: u64, images: &[String], index: usize) {
        self.preview
            .insert(gallery_store_key(product_id, images), index);
    }

    /// Clears the seed, pagination and preview indices.
    pub fn reset(&mut self) {
        self.seed = None;
        self.visible.clear();
        self.preview.clear();
        debug!("session state reset");
    }

    /// Serializes the session into a versioned snapshot.
    pub fn snapshot(&self) -> Result<Vec<u8>, VitrineError> {
        let snapshot = SessionSnapshot {
            schema: Self::SCHEMA,
            seed: self.seed,
            visible: self.visible.clone(),
            preview: self.preview.clone(),
        };
        bincode::serialize(&snapshot).map_err(|err| {
            VitrineError::Session(ErrorInfo::new("session.encode", err.to_string()))
        })
    }

    /// Restores a session from a snapshot produced by [`snapshot`].
    ///
    /// [`snapshot`]: SessionState::snapshot
    pub fn restore(bytes: &[u8]) -> Result<Self, VitrineError> {
        let snapshot: SessionSnapshot = bincode::deserialize(bytes).map_err(|err| {
            VitrineError::Session(ErrorInfo::new("session.decode", err.to_string()))
        })?;
        if !Self::SCHEMA.accepts(&snapshot.schema) {
            return Err(VitrineError::Session(
                ErrorInfo::new("session.schema", "snapshot schema is not readable")
                    .with_context("expected_major", Self::SCHEMA.major.to_string())
                    .with_context("found_major", snapshot.schema.major.to_string()),
            ));
        }
        Ok(Self {
            seed: snapshot.seed,
            visible: snapshot.visible,
            preview: snapshot.preview,
        })
    }
}

fn gallery_store_key(product_id: u64, images: &[String]) -> u64 {
    let id_text = product_id.to_string();
    let mut parts: Vec<&str> = Vec::with_capacity(images.len() + 1);
    parts.push(&id_text);
    parts.extend(images.iter().map(String::as_str));
    derive_store_key(PREVIEW_NAMESPACE, &parts)
}
