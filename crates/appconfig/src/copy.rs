//! The graph copier: recursive member-wise merge between two settings
//! objects of compatible shape.

use crate::errors::CopyError;
use crate::member::{self, MemberKind};
use crate::object::{CompositeMut, CompositeRef, ConfigObject};

/// What to do when a shape mismatch is discovered mid-recursion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecursionErrorPolicy {
    /// Re-raise the failure to the `copy_into` caller.
    #[default]
    Propagate,
    /// Downgrade to a direct whole-member assignment.
    FallbackToAssign,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CopyOptions {
    pub on_recursion_error: RecursionErrorPolicy,
    /// Also skip members carrying the serialization-exclusion tag. Set by
    /// the persistence loader so a load never touches members that were
    /// absent from the file by design.
    pub skip_serialization_excluded: bool,
    /// Only meaningful with `skip_serialization_excluded`: include members
    /// backed by custom accessors.
    pub allow_custom_accessors: bool,
}

impl CopyOptions {
    pub fn with_policy(on_recursion_error: RecursionErrorPolicy) -> Self {
        Self {
            on_recursion_error,
            ..Self::default()
        }
    }
}

/// Merge member values from `source` into `target`.
///
/// Walks `target`'s descriptor table: writable members without the
/// copy-exclusion tag are transferred, leaves by direct assignment and
/// composites by recursing into their own descriptors. Members whose name,
/// readability, or kind do not agree on both sides are skipped silently.
/// External references to `target` stay valid; the object is mutated in
/// place, never replaced.
pub fn copy_into(
    source: &dyn ConfigObject,
    target: &mut dyn ConfigObject,
    options: &CopyOptions,
) -> Result<(), CopyError> {
    for descriptor in target.descriptors() {
        if !descriptor.writable || descriptor.no_copy {
            continue;
        }
        if options.skip_serialization_excluded
            && !descriptor.serialized(options.allow_custom_accessors)
        {
            continue;
        }
        let Some(source_descriptor) = member::find(source.descriptors(), descriptor.name) else {
            continue;
        };
        if !source_descriptor.readable || source_descriptor.kind != descriptor.kind {
            continue;
        }
        match descriptor.kind {
            MemberKind::Leaf => {
                if let Some(value) = source.get_leaf(descriptor.name) {
                    // A leaf that doesn't fit the target's type is a
                    // definition mismatch; skip it like any other.
                    let _ = target.set_leaf(descriptor.name, value);
                }
            }
            MemberKind::Composite => {
                copy_composite(source, target, descriptor.name, options)?;
            }
        }
    }
    Ok(())
}

fn copy_composite(
    source: &dyn ConfigObject,
    target: &mut dyn ConfigObject,
    name: &str,
    options: &CopyOptions,
) -> Result<(), CopyError> {
    let target_present = match target.composite(name) {
        None => return Ok(()),
        Some(CompositeRef::Present(_)) => true,
        Some(CompositeRef::Absent) => false,
    };

    match source.composite(name) {
        None => Ok(()),
        Some(CompositeRef::Absent) => {
            if target.clear_composite(name) {
                Ok(())
            } else {
                // The target member cannot hold an absent value.
                match options.on_recursion_error {
                    RecursionErrorPolicy::Propagate => {
                        Err(CopyError::IncompatibleMember(name.to_string()))
                    }
                    RecursionErrorPolicy::FallbackToAssign => Ok(()),
                }
            }
        }
        Some(CompositeRef::Present(source_sub)) => {
            if !target_present {
                // Cannot recurse into an absent target; take the source
                // value wholesale.
                return assign_whole(source_sub, target, name);
            }
            let recursed = {
                let Some(CompositeMut::Present(target_sub)) = target.composite_mut(name) else {
                    return Ok(());
                };
                copy_into(source_sub, target_sub, options)
            };
            match recursed {
                Ok(()) => Ok(()),
                Err(err) => match options.on_recursion_error {
                    RecursionErrorPolicy::Propagate => Err(err),
                    RecursionErrorPolicy::FallbackToAssign => {
                        assign_whole(source_sub, target, name)
                    }
                },
            }
        }
    }
}

fn assign_whole(
    source_sub: &dyn ConfigObject,
    target: &mut dyn ConfigObject,
    name: &str,
) -> Result<(), CopyError> {
    let value = source_sub.to_value().map_err(|err| CopyError::Snapshot {
        member: name.to_string(),
        message: err.to_string(),
    })?;
    if target.assign_composite(name, value) {
        Ok(())
    } else {
        Err(CopyError::IncompatibleMember(name.to_string()))
    }
}
