use parking_lot::Mutex;
use std::sync::Arc;

use crate::http::RestExecutor;

/// Creates a new executor when the pool has room for one more.
pub type ExecutorFactory = Arc<dyn Fn() -> Box<dyn RestExecutor> + Send + Sync>;

struct PoolState {
    idle: Vec<Box<dyn RestExecutor>>,
    creatable: usize,
}

struct ExecutorPoolInner {
    factory: ExecutorFactory,
    state: Mutex<PoolState>,
}

/// Bounded pool of [RestExecutor]s.
///
/// Executors are created lazily through the factory until `capacity` exist.
/// Once all of them are checked out, [ExecutorPool::pop] returns `None`
/// immediately; it never blocks or queues.
///
/// Cloning the pool shares the same executors.
#[derive(Clone)]
pub struct ExecutorPool {
    inner: Arc<ExecutorPoolInner>,
}

impl ExecutorPool {
    pub fn new(capacity: usize, factory: ExecutorFactory) -> Self {
        ExecutorPool {
            inner: Arc::new(ExecutorPoolInner {
                factory,
                state: Mutex::new(PoolState {
                    idle: Vec::new(),
                    creatable: capacity,
                }),
            }),
        }
    }

    /// Checks out an idle executor, creating one if the capacity allows.
    pub fn pop(&self) -> Option<Box<dyn RestExecutor>> {
        let mut state = self.inner.state.lock();
        if let Some(executor) = state.idle.pop() {
            return Some(executor);
        }
        if state.creatable == 0 {
            log::error!("HTTP Connection Over");
            return None;
        }
        state.creatable -= 1;
        Some((self.inner.factory)())
    }

    /// Returns an executor obtained from [ExecutorPool::pop].
    pub fn push(&self, executor: Box<dyn RestExecutor>) {
        self.inner.state.lock().idle.push(executor);
    }

    /// Number of executors waiting in the pool.
    pub fn idle_count(&self) -> usize {
        self.inner.state.lock().idle.len()
    }
}
