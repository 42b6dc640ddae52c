//! The default-instance registry.
//!
//! A [`Registry`] is an explicit context object holding "the" settings
//! instance for some scope; pass it to the code that needs it. The
//! process-wide [`global`] registry is kept as an opt-in ambient shim for
//! code that cannot take a reference — together with the anonymous
//! [`Registry::get_member`]/[`Registry::set_member`] accessors it
//! deliberately punches through encapsulation and should not be the primary
//! access path.

use crate::errors::ConfigError;
use crate::instance::AnyInstance;
use ron::value::Value;
use std::sync::{Arc, RwLock};

pub struct Registry {
    slot: RwLock<Option<Arc<dyn AnyInstance>>>,
}

impl Registry {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Set the default instance. Without `force` this only succeeds while no
    /// default exists; replacing an established default is always an
    /// explicit act. Returns whether `instance` is now the default.
    pub fn register(&self, instance: Arc<dyn AnyInstance>, force: bool) -> bool {
        let mut slot = self.slot.write().unwrap();
        if slot.is_none() || force {
            *slot = Some(instance);
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> Result<Arc<dyn AnyInstance>, ConfigError> {
        self.slot
            .read()
            .unwrap()
            .clone()
            .ok_or(ConfigError::Uninitialized)
    }

    /// For callers that must avoid the [`ConfigError::Uninitialized`] path.
    pub fn has_instance(&self) -> bool {
        self.slot.read().unwrap().is_some()
    }

    /// Drop the default. Returns whether one was set.
    pub fn clear(&self) -> bool {
        self.slot.write().unwrap().take().is_some()
    }

    /// Anonymous read of a named member on the default instance. Answers
    /// `None` when no default exists or the name is unmatched; never an
    /// error.
    pub fn get_member(&self, name: &str) -> Option<Value> {
        self.slot.read().unwrap().as_ref()?.get_member(name)
    }

    /// Anonymous write of a named member on the default instance. A silent
    /// no-op when no default exists or the name is unmatched.
    pub fn set_member(&self, name: &str, value: Value) -> bool {
        match self.slot.read().unwrap().as_ref() {
            Some(instance) => instance.set_member(name, value),
            None => false,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide ambient registry. The first constructed
/// [`crate::Instance`] registers itself here unless created detached.
pub fn global() -> &'static Registry {
    static GLOBAL: Registry = Registry::new();
    &GLOBAL
}
