//! The settings-object trait.

use crate::errors::ConfigError;
use crate::member::MemberDescriptor;
use ron::value::Value;

/// Read access to a composite member.
pub enum CompositeRef<'a> {
    Present(&'a dyn ConfigObject),
    Absent,
}

/// Write access to a composite member.
pub enum CompositeMut<'a> {
    Present(&'a mut dyn ConfigObject),
    Absent,
}

/// A settings object with a declared, enumerable member surface.
///
/// Implementations declare a `static` [`MemberDescriptor`] table and route
/// the name-indexed accessors through it. The accessors are best-effort by
/// contract: unknown names and shape mismatches answer `None`/`false` and are
/// never errors. Types should derive `Serialize`/`Deserialize` with
/// `#[serde(default)]` so partially-populated files deserialize cleanly; the
/// [`crate::value`] helpers cover the conversion boilerplate.
pub trait ConfigObject: 'static + Send + Sync {
    /// The member table for this type.
    fn descriptors(&self) -> &'static [MemberDescriptor];

    /// Snapshot a leaf member's current value.
    fn get_leaf(&self, name: &str) -> Option<Value>;

    /// Write a leaf member. Returns `false` when the name does not match a
    /// leaf member or the value does not fit its type.
    fn set_leaf(&mut self, name: &str, value: Value) -> bool;

    /// Borrow a composite member, distinguishing an absent value from an
    /// unknown name (`None`).
    fn composite(&self, name: &str) -> Option<CompositeRef<'_>>;

    fn composite_mut(&mut self, name: &str) -> Option<CompositeMut<'_>>;

    /// Set a composite member to absent. Returns `false` when the member
    /// cannot hold an absent value.
    fn clear_composite(&mut self, name: &str) -> bool;

    /// Replace a composite member wholesale from its serialized value.
    fn assign_composite(&mut self, name: &str, value: Value) -> bool;

    /// Full serde snapshot of the object.
    fn to_value(&self) -> Result<Value, ConfigError>;

    /// Build a transient instance of the same type from a serialized value.
    /// Used by the persistence loader, which merges the transient into the
    /// live object and discards it.
    fn transient(&self, value: Value) -> Result<Box<dyn ConfigObject>, ConfigError>;
}
