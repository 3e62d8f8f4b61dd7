use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tally of completed round-trips, shared by every caller actor.
///
/// Clones share the same count. Correctness rests only on the atomicity of
/// [`increment`](OpCounter::increment) and [`load`](OpCounter::load); there
/// is no lock and no owner.
#[derive(Debug, Clone, Default)]
pub struct OpCounter {
    ops: Arc<AtomicU64>,
}

impl OpCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment(&self) {
        self.ops.fetch_add(1, Ordering::SeqCst);
    }

    /// A total that existed at some point during the call. Increments still in
    /// flight may land right after.
    #[inline]
    pub fn load(&self) -> u64 {
        self.ops.load(Ordering::SeqCst)
    }
}
