//! Store-side id generation
//!
//! Produces 24-character hex tokens shaped like document-store object ids. Each id is
//! the first 12 bytes of a blake3 digest over wall-clock nanos, a process-wide
//! counter, and the process id, so two ids minted in the same nanosecond still differ.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

const ID_BYTES: usize = 12;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh id.
pub fn generate_id() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = blake3::Hasher::new();
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&count.to_le_bytes());
    hasher.update(&std::process::id().to_le_bytes());
    let digest = hasher.finalize();

    hex::encode(&digest.as_bytes()[..ID_BYTES])
}

/// Use the caller's id when it is non-blank, otherwise generate one.
pub fn id_or_generate(id: Option<&str>) -> String {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => generate_id(),
    }
}
