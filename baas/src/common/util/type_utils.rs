use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, lock-guarded cell used for state that is captured once and read
/// from many clones (e.g. error backtraces).
pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}
