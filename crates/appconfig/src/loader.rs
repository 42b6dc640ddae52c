//! File persistence for settings instances.
//!
//! Writes are atomic: the serialized text goes to a temporary file next to
//! the target, which is then renamed over it, so readers observe either the
//! old complete file or the new complete file. All failures are absorbed
//! into boolean results and the saved/loaded events; callers never need
//! error handling around `save`/`load`.

use crate::codec::EncodeOptions;
use crate::copy::RecursionErrorPolicy;
use crate::errors::ConfigError;
use crate::instance::AnyInstance;
use crate::notify::Listeners;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fired after every save/load attempt. Carries no underlying error by
/// design; failures are opaque to subscribers.
#[derive(Clone, Debug)]
pub struct LoaderEvent {
    pub path: PathBuf,
    pub success: bool,
}

/// A persistence backend for settings instances.
pub trait Loader: Send + Sync {
    fn save(&self, instance: &dyn AnyInstance) -> bool;
    fn load(&self, instance: &dyn AnyInstance) -> bool;
}

/// [`Loader`] backed by a RON file in the local filesystem.
///
/// A single per-loader mutex sequences `save`, `load`, and path changes, so
/// a concurrent save/load pair against the same path never interleaves. The
/// lock is advisory within one process only; pointing several loaders or
/// processes at the same file is the caller's responsibility.
pub struct RonLoader {
    path: Mutex<PathBuf>,
    options: EncodeOptions,
    on_recursion_error: RecursionErrorPolicy,
    saved: Listeners<LoaderEvent>,
    loaded: Listeners<LoaderEvent>,
}

impl RonLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, EncodeOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: EncodeOptions) -> Self {
        Self {
            path: Mutex::new(path.into()),
            options,
            on_recursion_error: RecursionErrorPolicy::default(),
            saved: Listeners::new(),
            loaded: Listeners::new(),
        }
    }

    pub fn on_recursion_error(mut self, policy: RecursionErrorPolicy) -> Self {
        self.on_recursion_error = policy;
        self
    }

    pub fn path(&self) -> PathBuf {
        self.path.lock().unwrap().clone()
    }

    /// Change the target path; sequenced against in-flight saves/loads.
    pub fn set_path(&self, path: impl Into<PathBuf>) {
        *self.path.lock().unwrap() = path.into();
    }

    pub fn saved(&self) -> &Listeners<LoaderEvent> {
        &self.saved
    }

    pub fn loaded(&self) -> &Listeners<LoaderEvent> {
        &self.loaded
    }

    fn save_locked(&self, path: &Path, instance: &dyn AnyInstance) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        let text = match instance.encode(&self.options) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("failed to serialize settings for {}: {err}", path.display());
                return false;
            }
        };
        match write_atomic(path, &text) {
            Ok(()) => {
                log::debug!("settings saved to {}", path.display());
                true
            }
            Err(err) => {
                log::warn!("failed to write settings to {}: {err}", path.display());
                false
            }
        }
    }

    fn load_locked(&self, path: &Path, instance: &dyn AnyInstance) -> bool {
        if path.as_os_str().is_empty() || !path.exists() {
            return false;
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("failed to read settings from {}: {err}", path.display());
                return false;
            }
        };
        match instance.merge_encoded(&text, &self.options, self.on_recursion_error) {
            Ok(()) => {
                log::debug!("settings loaded from {}", path.display());
                true
            }
            Err(err) => {
                log::warn!("failed to load settings from {}: {err}", path.display());
                false
            }
        }
    }
}

impl Loader for RonLoader {
    fn save(&self, instance: &dyn AnyInstance) -> bool {
        let event = {
            let path = self.path.lock().unwrap();
            let success = self.save_locked(&path, instance);
            LoaderEvent {
                path: path.clone(),
                success,
            }
        };
        let success = event.success;
        self.saved.emit(&event);
        success
    }

    fn load(&self, instance: &dyn AnyInstance) -> bool {
        let event = {
            let path = self.path.lock().unwrap();
            let success = self.load_locked(&path, instance);
            LoaderEvent {
                path: path.clone(),
                success,
            }
        };
        // A completed attempt counts, successful or not; this is what arms
        // autosave controllers awaiting their first load.
        instance.mark_load_attempt();
        let success = event.success;
        self.loaded.emit(&event);
        success
    }
}

/// Write `contents` to `path` via a temporary file in the same directory
/// plus an atomic rename. On failure the target file is left untouched and
/// the temporary file is removed.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    let result = (|| {
        let mut file = File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                File::open(parent)?.sync_all()?;
            }
        }
        Ok(())
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
