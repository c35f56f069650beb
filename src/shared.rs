//! Shared store handle with change notification.
//!
//! [`SharedFlow`] wraps a [`FlowStore`] in a `parking_lot::RwLock`. Writes
//! take the write lock, apply completely, then downgrade to a read lock
//! before listeners run, so every listener and every concurrent reader sees
//! the store either before or after a mutation, never in between.
//!
//! Listeners are called with the store borrowed; they must not call back
//! into the same handle's write methods.

use crate::error::FlowResult;
use crate::flow::FlowStore;
use crate::input::FlowEvent;
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

type Listener<T> = Box<dyn Fn(&FlowStore<T>) + Send + Sync>;

/// Handle returned by [`SharedFlow::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct SharedFlow<T = serde_json::Value> {
    store: Arc<RwLock<FlowStore<T>>>,
    listeners: Arc<Mutex<Vec<(SubscriptionId, Listener<T>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for SharedFlow<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> SharedFlow<T> {
    pub fn new(store: FlowStore<T>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Read the current state.
    pub fn read(&self) -> RwLockReadGuard<'_, FlowStore<T>> {
        self.store.read()
    }

    /// Dispatch an intent and notify listeners once it has been applied.
    pub fn dispatch(&self, event: FlowEvent) -> FlowResult<()> {
        self.update(|store| store.dispatch(event))
    }

    /// Run an arbitrary mutation under the write lock, then notify.
    pub fn update<R>(&self, f: impl FnOnce(&mut FlowStore<T>) -> R) -> R {
        let mut guard = self.store.write();
        let result = f(&mut *guard);
        let guard = RwLockWriteGuard::downgrade(guard);
        self.notify(&*guard);
        result
    }

    pub fn subscribe(&self, listener: impl Fn(&FlowStore<T>) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    fn notify(&self, store: &FlowStore<T>) {
        let listeners = self.listeners.lock();
        trace!(count = listeners.len(), revision = store.revision(), "Notifying listeners");
        for (_, listener) in listeners.iter() {
            listener(store);
        }
    }
}
