//! Owning composition: instance + loader + optional autosave.

use crate::copy::{CopyOptions, RecursionErrorPolicy};
use crate::errors::CopyError;
use crate::instance::{AnyInstance, Instance};
use crate::loader::{Loader, RonLoader};
use crate::notify::ChangeNotifier;
use crate::object::ConfigObject;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Manages a settings instance together with the loader that persists it.
///
/// The managed instance is constructed lazily on first access, with change
/// forwarding and autosave wiring already attached. Replacing it is never
/// possible: [`ConfigManager::set_instance`] and the reset operations copy
/// values into the managed instance, so external references and
/// subscriptions stay valid across resets and reloads.
pub struct ConfigManager<T: ConfigObject + Default> {
    instance: OnceLock<Arc<Instance<T>>>,
    loader: Arc<dyn Loader>,
    autosave: Arc<AtomicBool>,
    forwarding: Arc<AtomicBool>,
    notifier: Arc<ChangeNotifier>,
    copy_options: CopyOptions,
}

impl<T: ConfigObject + Default> ConfigManager<T> {
    pub fn new(loader: Arc<dyn Loader>) -> Self {
        Self {
            instance: OnceLock::new(),
            loader,
            autosave: Arc::new(AtomicBool::new(false)),
            forwarding: Arc::new(AtomicBool::new(true)),
            notifier: Arc::new(ChangeNotifier::new()),
            copy_options: CopyOptions::default(),
        }
    }

    /// Convenience constructor wiring a [`RonLoader`] for `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(RonLoader::new(path)))
    }

    pub fn on_recursion_error(mut self, policy: RecursionErrorPolicy) -> Self {
        self.copy_options = CopyOptions::with_policy(policy);
        self
    }

    /// The managed instance, constructed on first access.
    pub fn instance(&self) -> Arc<Instance<T>> {
        self.instance
            .get_or_init(|| {
                let instance = Instance::detached(T::default());
                let weak = Arc::downgrade(&instance);
                let loader = Arc::clone(&self.loader);
                let autosave = Arc::clone(&self.autosave);
                let forwarding = Arc::clone(&self.forwarding);
                let notifier = Arc::clone(&self.notifier);
                instance.notifier().subscribe(move |event| {
                    if let Some(instance) = weak.upgrade() {
                        if autosave.load(Ordering::SeqCst) && !instance.is_loading() {
                            loader.save(&*instance);
                        }
                    }
                    if forwarding.load(Ordering::SeqCst) {
                        notifier.emit(event);
                    }
                });
                instance
            })
            .clone()
    }

    /// Copy `value` into the managed instance (the instance reference never
    /// changes).
    pub fn set_instance(&self, value: &T) -> Result<(), CopyError> {
        self.instance().apply(value, &self.copy_options)
    }

    pub fn loader(&self) -> &Arc<dyn Loader> {
        &self.loader
    }

    /// Change events forwarded from the managed instance.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn autosave(&self) -> bool {
        self.autosave.load(Ordering::SeqCst)
    }

    /// When enabled, every member change saves through the loader, except
    /// changes applied by a load in progress.
    pub fn set_autosave(&self, enabled: bool) {
        self.autosave.store(enabled, Ordering::SeqCst);
    }

    pub fn forwarding(&self) -> bool {
        self.forwarding.load(Ordering::SeqCst)
    }

    /// Whether instance change events are re-emitted on the manager's own
    /// notifier.
    pub fn set_forwarding(&self, enabled: bool) {
        self.forwarding.store(enabled, Ordering::SeqCst);
    }

    pub fn save(&self) -> bool {
        self.loader.save(&*self.instance())
    }

    pub fn load(&self) -> bool {
        self.loader.load(&*self.instance())
    }

    /// Copy `defaults` into the managed instance.
    pub fn reset(&self, defaults: &T) -> Result<(), CopyError> {
        self.instance().apply(defaults, &self.copy_options)
    }

    /// Reset to a fresh default-valued instance of the same type.
    pub fn reset_to_default(&self) -> Result<(), CopyError> {
        self.reset(&T::default())
    }
}
