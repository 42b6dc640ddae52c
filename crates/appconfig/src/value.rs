//! Conversions between typed settings data and `ron::Value` trees.
//!
//! All conversions go through RON text, which keeps them consistent with what
//! the persistence layer writes and reads.

use crate::errors::ConfigError;
use ron::value::Value;
use serde::{de::DeserializeOwned, Serialize};

/// Convert any serializable value to a `ron::Value`.
pub fn to_ron_value<T: Serialize>(value: &T) -> Result<Value, ConfigError> {
    let text = ron::to_string(value)?;
    Ok(ron::from_str(&text)?)
}

/// Rebuild a typed value from a `ron::Value`.
pub fn from_ron_value<T: DeserializeOwned>(value: &Value) -> Result<T, ConfigError> {
    let text = ron::to_string(value)?;
    Ok(ron::from_str(&text)?)
}

/// Assign `value` into `slot` if it deserializes to the slot's type.
/// Returns `false` on a shape mismatch, leaving the slot unchanged.
pub fn assign_from_value<T: DeserializeOwned>(slot: &mut T, value: &Value) -> bool {
    match from_ron_value(value) {
        Ok(v) => {
            *slot = v;
            true
        }
        Err(_) => false,
    }
}

/// Map key for a member name.
pub(crate) fn key(name: &str) -> Value {
    Value::String(name.to_string())
}
