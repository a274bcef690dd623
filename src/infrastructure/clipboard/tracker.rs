//! Synthesized change counter for clipboards without a native one

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::domain::clipboard::{ChangeCount, ClipboardContent};

#[derive(Debug, Default)]
struct TrackerState {
    fingerprint: Option<u64>,
    count: ChangeCount,
}

/// Turns successive content reads into a generation counter.
///
/// The counter moves whenever the content fingerprint differs from the
/// previous read. Writing identical content again is not visible, which the
/// history tolerates because re-copying the same value only promotes it.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    state: Mutex<TrackerState>,
}

impl ChangeTracker {
    /// Create a tracker at generation zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one read, get the resulting generation
    pub fn observe(&self, content: &ClipboardContent) -> ChangeCount {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        let fingerprint = hasher.finish();

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.fingerprint != Some(fingerprint) {
            state.fingerprint = Some(fingerprint);
            state.count = state.count.wrapping_add(1);
        }
        state.count
    }
}
