//! Synchronous observer lists.
//!
//! Subscribers run on the emitting thread, in registration order. Ids are
//! process-unique so lists can be merged when instances are copied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

static NEXT_SUBSCRIBER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// How subscriptions travel along with an instance copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubscriberCopy {
    /// Values only; the target's subscriptions are untouched.
    #[default]
    Skip,
    /// The source's subscribers are attached after the target's own.
    Additive,
    /// The target's subscribers are detached first, then the source's attached.
    Replace,
}

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// An ordered list of event subscribers.
pub struct Listeners<E> {
    entries: RwLock<Vec<(SubscriberId, Callback<E>)>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(NEXT_SUBSCRIBER_ID.fetch_add(1, Ordering::Relaxed));
        self.entries
            .write()
            .unwrap()
            .push((id, Arc::new(callback)));
        id
    }

    /// Returns `false` when the id was not subscribed here.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Invoke every subscriber with `event`, in registration order.
    ///
    /// The list is snapshotted first, so subscribers may themselves
    /// subscribe or unsubscribe without deadlocking.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = self
            .entries
            .read()
            .unwrap()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take over the subscriptions of `source` according to `mode`.
    pub fn adopt(&self, source: &Self, mode: SubscriberCopy) {
        if matches!(mode, SubscriberCopy::Skip) {
            return;
        }
        let adopted: Vec<(SubscriberId, Callback<E>)> = source
            .entries
            .read()
            .unwrap()
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();
        let mut entries = self.entries.write().unwrap();
        if matches!(mode, SubscriberCopy::Replace) {
            entries.clear();
        }
        entries.extend(adopted);
    }
}

/// A member of the settings instance changed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub member: String,
}

pub type ChangeNotifier = Listeners<ChangeEvent>;
