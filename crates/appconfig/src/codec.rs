//! The serializer boundary: settings object <-> structured text.
//!
//! Encoding strips members carrying the serialization-exclusion tag (and,
//! unless opted in, members with custom accessors) and applies an optional
//! field-naming policy. Decoding reverses the naming policy, drops excluded
//! keys so file data can never reach an excluded member, and ignores unknown
//! keys.

use crate::errors::ConfigError;
use crate::member::MemberKind;
use crate::object::{CompositeRef, ConfigObject};
use crate::value;
use ron::value::{Map, Value};

/// How declared member names map to file keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NamingPolicy {
    #[default]
    Preserve,
    CamelCase,
    PascalCase,
}

impl NamingPolicy {
    /// Translate a declared (snake_case) member name into its file key.
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingPolicy::Preserve => name.to_string(),
            NamingPolicy::CamelCase => case_join(name, false),
            NamingPolicy::PascalCase => case_join(name, true),
        }
    }
}

fn case_join(name: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, part) in name.split('_').filter(|p| !p.is_empty()).enumerate() {
        if i == 0 && !capitalize_first {
            out.push_str(part);
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeOptions {
    pub naming: NamingPolicy,
    /// Include members backed by custom accessors in the file.
    pub allow_custom_accessors: bool,
}

/// Serialize `object` to file text.
pub fn encode(object: &dyn ConfigObject, options: &EncodeOptions) -> Result<String, ConfigError> {
    let Value::Map(mut map) = object.to_value()? else {
        return Err(ConfigError::NotAMap);
    };
    strip_excluded(object, &mut map, options);
    rename_to_file_keys(object, &mut map, options.naming);
    Ok(ron::ser::to_string_pretty(
        &Value::Map(map),
        ron::ser::PrettyConfig::default(),
    )?)
}

/// Parse file text into a transient instance shaped like `prototype`.
pub fn decode(
    prototype: &dyn ConfigObject,
    text: &str,
    options: &EncodeOptions,
) -> Result<Box<dyn ConfigObject>, ConfigError> {
    let Value::Map(mut map) = ron::from_str(text)? else {
        return Err(ConfigError::NotAMap);
    };
    rename_to_member_names(prototype, &mut map, options.naming);
    strip_excluded(prototype, &mut map, options);
    prototype.transient(Value::Map(map))
}

fn strip_excluded(object: &dyn ConfigObject, map: &mut Map, options: &EncodeOptions) {
    for descriptor in object.descriptors() {
        let key = value::key(descriptor.name);
        if !descriptor.readable || !descriptor.serialized(options.allow_custom_accessors) {
            map.remove(&key);
            continue;
        }
        if descriptor.kind == MemberKind::Composite {
            if let Some(CompositeRef::Present(sub)) = object.composite(descriptor.name) {
                if let Some(mut entry) = map.remove(&key) {
                    strip_excluded_value(sub, &mut entry, options);
                    map.insert(key, entry);
                }
            }
        }
    }
}

fn strip_excluded_value(object: &dyn ConfigObject, entry: &mut Value, options: &EncodeOptions) {
    match entry {
        Value::Map(sub_map) => strip_excluded(object, sub_map, options),
        Value::Option(Some(inner)) => strip_excluded_value(object, inner.as_mut(), options),
        _ => {}
    }
}

fn rename_to_file_keys(object: &dyn ConfigObject, map: &mut Map, naming: NamingPolicy) {
    if naming == NamingPolicy::Preserve {
        return;
    }
    for descriptor in object.descriptors() {
        let key = value::key(descriptor.name);
        let Some(mut entry) = map.remove(&key) else {
            continue;
        };
        if descriptor.kind == MemberKind::Composite {
            if let Some(CompositeRef::Present(sub)) = object.composite(descriptor.name) {
                rename_value(sub, &mut entry, naming, true);
            }
        }
        map.insert(Value::String(naming.apply(descriptor.name)), entry);
    }
}

fn rename_to_member_names(object: &dyn ConfigObject, map: &mut Map, naming: NamingPolicy) {
    if naming == NamingPolicy::Preserve {
        return;
    }
    for descriptor in object.descriptors() {
        let file_key = Value::String(naming.apply(descriptor.name));
        let Some(mut entry) = map.remove(&file_key) else {
            continue;
        };
        if descriptor.kind == MemberKind::Composite {
            if let Some(CompositeRef::Present(sub)) = object.composite(descriptor.name) {
                rename_value(sub, &mut entry, naming, false);
            }
        }
        map.insert(value::key(descriptor.name), entry);
    }
}

fn rename_value(object: &dyn ConfigObject, entry: &mut Value, naming: NamingPolicy, to_file: bool) {
    match entry {
        Value::Map(sub_map) => {
            if to_file {
                rename_to_file_keys(object, sub_map, naming);
            } else {
                rename_to_member_names(object, sub_map, naming);
            }
        }
        Value::Option(Some(inner)) => rename_value(object, inner.as_mut(), naming, to_file),
        _ => {}
    }
}
