use sha2::{Digest, Sha256};

use crate::interleave::SlotAssignment;

/// Computes the canonical hex digest of a slot assignment.
///
/// Encodes the tile count and each `(slot, campaign id)` pair in slot order,
/// length-prefixing the id so the framing stays unambiguous. Two assignments
/// digest equal exactly when they place the same campaigns on the same slots.
pub fn assignment_digest(assignment: &SlotAssignment) -> String {
    let mut hasher = Sha256::new();
    hasher.update((assignment.len() as u64).to_le_bytes());
    for (slot, campaign) in assignment.iter() {
        hasher.update((slot as u64).to_le_bytes());
        hasher.update((campaign.id.len() as u64).to_le_bytes());
        hasher.update(campaign.id.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
