//! The shared live settings instance.
//!
//! An [`Instance`] is the process-lifetime cell an application holds
//! references to. Loads and resets mutate the contained object in place;
//! the `Arc<Instance<T>>` handed out at construction stays valid for the
//! life of the process.

use crate::codec::{self, EncodeOptions};
use crate::copy::{copy_into, CopyOptions, RecursionErrorPolicy};
use crate::errors::{ConfigError, CopyError};
use crate::member::MemberKind;
use crate::notify::{ChangeEvent, ChangeNotifier, SubscriberCopy};
use crate::object::{CompositeRef, ConfigObject};
use crate::registry;
use ron::value::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard};

pub struct Instance<T: ConfigObject> {
    state: RwLock<T>,
    notifier: ChangeNotifier,
    loading: AtomicBool,
    loaded_once: AtomicBool,
}

impl<T: ConfigObject> Instance<T> {
    /// Wrap `value` as a shared instance and register it as the process-wide
    /// default if none is set yet.
    pub fn new(value: T) -> Arc<Self> {
        let instance = Self::detached(value);
        registry::global().register(instance.clone(), false);
        instance
    }

    /// Wrap `value` without touching the default-instance registry.
    pub fn detached(value: T) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(value),
            notifier: ChangeNotifier::new(),
            loading: AtomicBool::new(false),
            loaded_once: AtomicBool::new(false),
        })
    }

    /// Read access to the typed settings object.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.state.read().unwrap()
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Mutate the settings object through a closure.
    ///
    /// Members whose value changed are detected by comparing snapshots taken
    /// before and after the closure runs; one [`ChangeEvent`] per changed
    /// member fires after the write lock is released, synchronously on the
    /// calling thread.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let (result, changed) = {
            let mut guard = self.state.write().unwrap();
            let before = member_values(&*guard);
            let result = mutate(&mut guard);
            let changed = changed_members(&before, &member_values(&*guard));
            (result, changed)
        };
        self.emit_changes(changed);
        result
    }

    /// Name-indexed member read. Unknown names answer `None`.
    pub fn get(&self, name: &str) -> Option<Value> {
        let guard = self.state.read().unwrap();
        let descriptor = crate::member::find(guard.descriptors(), name)?;
        if !descriptor.readable {
            return None;
        }
        match descriptor.kind {
            MemberKind::Leaf => guard.get_leaf(name),
            MemberKind::Composite => match guard.composite(name)? {
                CompositeRef::Present(sub) => sub.to_value().ok(),
                CompositeRef::Absent => Some(Value::Option(None)),
            },
        }
    }

    /// Name-indexed member write; a no-op answering `false` when the name is
    /// unmatched or the value does not fit. Fires a change event when the
    /// stored value actually changed.
    pub fn set(&self, name: &str, value: Value) -> bool {
        let (written, changed) = {
            let mut guard = self.state.write().unwrap();
            let Some(descriptor) = crate::member::find(guard.descriptors(), name) else {
                return false;
            };
            if !descriptor.writable {
                return false;
            }
            let before = member_value(&*guard, name, descriptor.kind);
            let written = match descriptor.kind {
                MemberKind::Leaf => guard.set_leaf(name, value),
                MemberKind::Composite => match value {
                    Value::Option(None) => guard.clear_composite(name),
                    other => guard.assign_composite(name, other),
                },
            };
            let changed = written && before != member_value(&*guard, name, descriptor.kind);
            (written, changed)
        };
        if changed {
            self.notifier.emit(&ChangeEvent {
                member: name.to_string(),
            });
        }
        written
    }

    /// Merge member values from a plain settings object into this instance.
    pub fn apply(&self, source: &T, options: &CopyOptions) -> Result<(), CopyError> {
        let changed = {
            let mut guard = self.state.write().unwrap();
            let before = member_values(&*guard);
            copy_into(source, &mut *guard, options)?;
            changed_members(&before, &member_values(&*guard))
        };
        self.emit_changes(changed);
        Ok(())
    }

    /// Merge values from another instance, optionally transferring its
    /// change subscriptions as well.
    pub fn copy_from(
        &self,
        source: &Instance<T>,
        subscribers: SubscriberCopy,
        options: &CopyOptions,
    ) -> Result<(), CopyError> {
        if std::ptr::eq(self, source) {
            return Ok(());
        }
        let changed = {
            let source_guard = source.state.read().unwrap();
            let mut guard = self.state.write().unwrap();
            let before = member_values(&*guard);
            copy_into(&*source_guard, &mut *guard, options)?;
            changed_members(&before, &member_values(&*guard))
        };
        self.notifier.adopt(&source.notifier, subscribers);
        self.emit_changes(changed);
        Ok(())
    }

    fn emit_changes(&self, changed: Vec<&'static str>) {
        for name in changed {
            self.notifier.emit(&ChangeEvent {
                member: name.to_string(),
            });
        }
    }
}

/// Object-safe facade over [`Instance`], used by registries and loaders to
/// hold instances of differing concrete types.
pub trait AnyInstance: Send + Sync {
    /// Anonymous member read; `None` on unmatched names by contract.
    fn get_member(&self, name: &str) -> Option<Value>;
    /// Anonymous member write; a silent no-op on unmatched names.
    fn set_member(&self, name: &str, value: Value) -> bool;
    /// Serialize the current state to file text.
    fn encode(&self, options: &EncodeOptions) -> Result<String, ConfigError>;
    /// Decode `text` into a transient object and merge it into this
    /// instance. The loading flag is held for the duration, including the
    /// change events fired by the merge.
    fn merge_encoded(
        &self,
        text: &str,
        options: &EncodeOptions,
        policy: RecursionErrorPolicy,
    ) -> Result<(), ConfigError>;
    fn is_loading(&self) -> bool;
    /// Whether a load attempt has completed, successfully or not.
    fn has_loaded(&self) -> bool;
    fn mark_load_attempt(&self);
    fn notifier(&self) -> &ChangeNotifier;
}

impl<T: ConfigObject> AnyInstance for Instance<T> {
    fn get_member(&self, name: &str) -> Option<Value> {
        self.get(name)
    }

    fn set_member(&self, name: &str, value: Value) -> bool {
        self.set(name, value)
    }

    fn encode(&self, options: &EncodeOptions) -> Result<String, ConfigError> {
        let guard = self.state.read().unwrap();
        codec::encode(&*guard, options)
    }

    fn merge_encoded(
        &self,
        text: &str,
        options: &EncodeOptions,
        policy: RecursionErrorPolicy,
    ) -> Result<(), ConfigError> {
        self.loading.store(true, Ordering::SeqCst);
        let result = (|| {
            let transient = {
                let guard = self.state.read().unwrap();
                codec::decode(&*guard, text, options)?
            };
            let copy_options = CopyOptions {
                on_recursion_error: policy,
                skip_serialization_excluded: true,
                allow_custom_accessors: options.allow_custom_accessors,
            };
            let changed = {
                let mut guard = self.state.write().unwrap();
                let before = member_values(&*guard);
                copy_into(&*transient, &mut *guard, &copy_options)?;
                changed_members(&before, &member_values(&*guard))
            };
            self.emit_changes(changed);
            Ok(())
        })();
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn has_loaded(&self) -> bool {
        self.loaded_once.load(Ordering::SeqCst)
    }

    fn mark_load_attempt(&self) {
        self.loaded_once.store(true, Ordering::SeqCst);
    }

    fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

fn member_value(object: &dyn ConfigObject, name: &str, kind: MemberKind) -> Option<Value> {
    match kind {
        MemberKind::Leaf => object.get_leaf(name),
        MemberKind::Composite => match object.composite(name) {
            Some(CompositeRef::Present(sub)) => sub.to_value().ok(),
            Some(CompositeRef::Absent) => Some(Value::Option(None)),
            None => None,
        },
    }
}

fn member_values(object: &dyn ConfigObject) -> Vec<(&'static str, Option<Value>)> {
    object
        .descriptors()
        .iter()
        .filter(|d| d.readable)
        .map(|d| (d.name, member_value(object, d.name, d.kind)))
        .collect()
}

fn changed_members(
    before: &[(&'static str, Option<Value>)],
    after: &[(&'static str, Option<Value>)],
) -> Vec<&'static str> {
    before
        .iter()
        .zip(after.iter())
        .filter(|((_, old), (_, new))| old != new)
        .map(|((name, _), _)| *name)
        .collect()
}
