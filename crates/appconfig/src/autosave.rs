//! Change-driven automatic persistence.

use crate::instance::AnyInstance;
use crate::loader::Loader;
use crate::notify::{ChangeEvent, SubscriberId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutosaveState {
    Disabled,
    /// Enabled, but triggers are ignored until a load attempt completes, so
    /// in-memory defaults cannot overwrite a not-yet-read file.
    ArmedAwaitingFirstLoad,
    Armed,
}

/// Saves the instance through the loader whenever one of its members
/// changes.
///
/// Enabling subscribes to the instance's change notification; disabling
/// unsubscribes again, so a disabled controller costs nothing at mutation
/// time. Change events fired while the instance is loading are ignored,
/// which keeps a load from re-triggering a save of the values it just
/// loaded. Each accepted event causes exactly one synchronous save.
pub struct AutosaveController {
    instance: Arc<dyn AnyInstance>,
    loader: Arc<dyn Loader>,
    enabled: AtomicBool,
    subscription: Mutex<Option<SubscriberId>>,
}

impl AutosaveController {
    pub fn new(instance: Arc<dyn AnyInstance>, loader: Arc<dyn Loader>) -> Self {
        Self {
            instance,
            loader,
            enabled: AtomicBool::new(false),
            subscription: Mutex::new(None),
        }
    }

    pub fn enable(&self) {
        if self.enabled.swap(true, Ordering::SeqCst) {
            return;
        }
        let instance = Arc::downgrade(&self.instance);
        let loader = Arc::clone(&self.loader);
        let id = self.instance.notifier().subscribe(move |_event: &ChangeEvent| {
            let Some(instance) = instance.upgrade() else {
                return;
            };
            if instance.is_loading() || !instance.has_loaded() {
                return;
            }
            loader.save(&*instance);
        });
        *self.subscription.lock().unwrap() = Some(id);
        log::debug!("autosave enabled");
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        if let Some(id) = self.subscription.lock().unwrap().take() {
            self.instance.notifier().unsubscribe(id);
            log::debug!("autosave disabled");
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    pub fn state(&self) -> AutosaveState {
        if !self.enabled.load(Ordering::SeqCst) {
            AutosaveState::Disabled
        } else if !self.instance.has_loaded() {
            AutosaveState::ArmedAwaitingFirstLoad
        } else {
            AutosaveState::Armed
        }
    }

    pub fn save(&self) -> bool {
        self.loader.save(&*self.instance)
    }

    /// Load the instance through the loader. A completed attempt arms the
    /// controller whether or not it succeeded; a first run against a missing
    /// file must not suppress autosave forever.
    pub fn load(&self) -> bool {
        self.loader.load(&*self.instance)
    }
}
