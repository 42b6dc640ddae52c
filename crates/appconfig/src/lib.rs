//! Reusable application settings objects: declared member descriptors, a
//! recursive graph copier that merges loaded snapshots into the live
//! instance without breaking external references, crash-safe RON file
//! persistence, and change-driven autosave.

mod autosave;
mod codec;
mod copy;
mod errors;
mod instance;
mod loader;
mod manager;
pub mod member;
mod notify;
mod object;
pub mod registry;
pub mod value;

pub use autosave::{AutosaveController, AutosaveState};
pub use codec::{decode, encode, EncodeOptions, NamingPolicy};
pub use copy::{copy_into, CopyOptions, RecursionErrorPolicy};
pub use errors::{ConfigError, CopyError};
pub use instance::{AnyInstance, Instance};
pub use loader::{Loader, LoaderEvent, RonLoader};
pub use manager::ConfigManager;
pub use member::{MemberDescriptor, MemberKind};
pub use notify::{ChangeEvent, ChangeNotifier, Listeners, SubscriberCopy, SubscriberId};
pub use object::{CompositeMut, CompositeRef, ConfigObject};
pub use registry::Registry;
