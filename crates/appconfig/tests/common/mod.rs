//! Shared fixture types for the integration tests.
#![allow(dead_code)]

use appconfig::value::{assign_from_value, from_ron_value, to_ron_value};
use appconfig::{
    CompositeMut, CompositeRef, ConfigError, ConfigObject, MemberDescriptor,
};
use ron::value::Value;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub fn unique_temp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    p.push(format!("appconfig_test_{name}_{nanos}.ron"));
    p
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
    pub device_scale: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            maximized: false,
            device_scale: 1.0,
        }
    }
}

static WINDOW_MEMBERS: &[MemberDescriptor] = &[
    MemberDescriptor::leaf("width"),
    MemberDescriptor::leaf("height"),
    MemberDescriptor::leaf("maximized"),
    MemberDescriptor::leaf("device_scale").no_copy(),
];

impl ConfigObject for WindowConfig {
    fn descriptors(&self) -> &'static [MemberDescriptor] {
        WINDOW_MEMBERS
    }

    fn get_leaf(&self, name: &str) -> Option<Value> {
        match name {
            "width" => to_ron_value(&self.width).ok(),
            "height" => to_ron_value(&self.height).ok(),
            "maximized" => to_ron_value(&self.maximized).ok(),
            "device_scale" => to_ron_value(&self.device_scale).ok(),
            _ => None,
        }
    }

    fn set_leaf(&mut self, name: &str, value: Value) -> bool {
        match name {
            "width" => assign_from_value(&mut self.width, &value),
            "height" => assign_from_value(&mut self.height, &value),
            "maximized" => assign_from_value(&mut self.maximized, &value),
            "device_scale" => assign_from_value(&mut self.device_scale, &value),
            _ => false,
        }
    }

    fn composite(&self, _name: &str) -> Option<CompositeRef<'_>> {
        None
    }

    fn composite_mut(&mut self, _name: &str) -> Option<CompositeMut<'_>> {
        None
    }

    fn clear_composite(&mut self, _name: &str) -> bool {
        false
    }

    fn assign_composite(&mut self, _name: &str, _value: Value) -> bool {
        false
    }

    fn to_value(&self) -> Result<Value, ConfigError> {
        to_ron_value(self)
    }

    fn transient(&self, value: Value) -> Result<Box<dyn ConfigObject>, ConfigError> {
        Ok(Box::new(from_ron_value::<Self>(&value)?))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
}

static PROXY_MEMBERS: &[MemberDescriptor] = &[
    MemberDescriptor::leaf("host"),
    MemberDescriptor::leaf("port"),
];

impl ConfigObject for ProxyConfig {
    fn descriptors(&self) -> &'static [MemberDescriptor] {
        PROXY_MEMBERS
    }

    fn get_leaf(&self, name: &str) -> Option<Value> {
        match name {
            "host" => to_ron_value(&self.host).ok(),
            "port" => to_ron_value(&self.port).ok(),
            _ => None,
        }
    }

    fn set_leaf(&mut self, name: &str, value: Value) -> bool {
        match name {
            "host" => assign_from_value(&mut self.host, &value),
            "port" => assign_from_value(&mut self.port, &value),
            _ => false,
        }
    }

    fn composite(&self, _name: &str) -> Option<CompositeRef<'_>> {
        None
    }

    fn composite_mut(&mut self, _name: &str) -> Option<CompositeMut<'_>> {
        None
    }

    fn clear_composite(&mut self, _name: &str) -> bool {
        false
    }

    fn assign_composite(&mut self, _name: &str, _value: Value) -> bool {
        false
    }

    fn to_value(&self) -> Result<Value, ConfigError> {
        to_ron_value(self)
    }

    fn transient(&self, value: Value) -> Result<Box<dyn ConfigObject>, ConfigError> {
        Ok(Box::new(from_ron_value::<Self>(&value)?))
    }
}

/// The main fixture: leaves, both exclusion tags, a read-only member, an
/// always-present composite and an optional composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub text: String,
    pub box_is_checked: bool,
    pub session_token: String,
    pub runtime_id: u64,
    pub schema_rev: u32,
    pub window: WindowConfig,
    pub proxy: Option<ProxyConfig>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            box_is_checked: false,
            session_token: String::new(),
            runtime_id: 0,
            schema_rev: 1,
            window: WindowConfig::default(),
            proxy: None,
        }
    }
}

static DEMO_MEMBERS: &[MemberDescriptor] = &[
    MemberDescriptor::leaf("text"),
    MemberDescriptor::leaf("box_is_checked"),
    MemberDescriptor::leaf("session_token").no_serialize(),
    MemberDescriptor::leaf("runtime_id").no_copy(),
    MemberDescriptor::leaf("schema_rev").read_only(),
    MemberDescriptor::composite("window"),
    MemberDescriptor::composite("proxy"),
];

impl ConfigObject for DemoConfig {
    fn descriptors(&self) -> &'static [MemberDescriptor] {
        DEMO_MEMBERS
    }

    fn get_leaf(&self, name: &str) -> Option<Value> {
        match name {
            "text" => to_ron_value(&self.text).ok(),
            "box_is_checked" => to_ron_value(&self.box_is_checked).ok(),
            "session_token" => to_ron_value(&self.session_token).ok(),
            "runtime_id" => to_ron_value(&self.runtime_id).ok(),
            "schema_rev" => to_ron_value(&self.schema_rev).ok(),
            _ => None,
        }
    }

    fn set_leaf(&mut self, name: &str, value: Value) -> bool {
        match name {
            "text" => assign_from_value(&mut self.text, &value),
            "box_is_checked" => assign_from_value(&mut self.box_is_checked, &value),
            "session_token" => assign_from_value(&mut self.session_token, &value),
            "runtime_id" => assign_from_value(&mut self.runtime_id, &value),
            _ => false,
        }
    }

    fn composite(&self, name: &str) -> Option<CompositeRef<'_>> {
        match name {
            "window" => Some(CompositeRef::Present(&self.window)),
            "proxy" => Some(match &self.proxy {
                Some(proxy) => CompositeRef::Present(proxy),
                None => CompositeRef::Absent,
            }),
            _ => None,
        }
    }

    fn composite_mut(&mut self, name: &str) -> Option<CompositeMut<'_>> {
        match name {
            "window" => Some(CompositeMut::Present(&mut self.window)),
            "proxy" => Some(match &mut self.proxy {
                Some(proxy) => CompositeMut::Present(proxy),
                None => CompositeMut::Absent,
            }),
            _ => None,
        }
    }

    fn clear_composite(&mut self, name: &str) -> bool {
        match name {
            "proxy" => {
                self.proxy = None;
                true
            }
            _ => false,
        }
    }

    fn assign_composite(&mut self, name: &str, value: Value) -> bool {
        match name {
            "window" => assign_from_value(&mut self.window, &value),
            "proxy" => match from_ron_value::<ProxyConfig>(&value) {
                Ok(proxy) => {
                    self.proxy = Some(proxy);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    fn to_value(&self) -> Result<Value, ConfigError> {
        to_ron_value(self)
    }

    fn transient(&self, value: Value) -> Result<Box<dyn ConfigObject>, ConfigError> {
        Ok(Box::new(from_ron_value::<Self>(&value)?))
    }
}

/// Same member names as [`DemoConfig`] but `window` is a leaf here; used to
/// exercise the silent-skip rule for kind mismatches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MismatchedConfig {
    pub text: String,
    pub window: String,
}

static MISMATCHED_MEMBERS: &[MemberDescriptor] = &[
    MemberDescriptor::leaf("text"),
    MemberDescriptor::leaf("window"),
];

impl ConfigObject for MismatchedConfig {
    fn descriptors(&self) -> &'static [MemberDescriptor] {
        MISMATCHED_MEMBERS
    }

    fn get_leaf(&self, name: &str) -> Option<Value> {
        match name {
            "text" => to_ron_value(&self.text).ok(),
            "window" => to_ron_value(&self.window).ok(),
            _ => None,
        }
    }

    fn set_leaf(&mut self, name: &str, value: Value) -> bool {
        match name {
            "text" => assign_from_value(&mut self.text, &value),
            "window" => assign_from_value(&mut self.window, &value),
            _ => false,
        }
    }

    fn composite(&self, _name: &str) -> Option<CompositeRef<'_>> {
        None
    }

    fn composite_mut(&mut self, _name: &str) -> Option<CompositeMut<'_>> {
        None
    }

    fn clear_composite(&mut self, _name: &str) -> bool {
        false
    }

    fn assign_composite(&mut self, _name: &str, _value: Value) -> bool {
        false
    }

    fn to_value(&self) -> Result<Value, ConfigError> {
        to_ron_value(self)
    }

    fn transient(&self, value: Value) -> Result<Box<dyn ConfigObject>, ConfigError> {
        Ok(Box::new(from_ron_value::<Self>(&value)?))
    }
}

/// A config whose `proxy` member cannot be absent; copying an absent source
/// proxy into it is a shape mismatch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredProxyConfig {
    pub text: String,
    pub proxy: ProxyConfig,
}

static REQUIRED_PROXY_MEMBERS: &[MemberDescriptor] = &[
    MemberDescriptor::leaf("text"),
    MemberDescriptor::composite("proxy"),
];

impl ConfigObject for RequiredProxyConfig {
    fn descriptors(&self) -> &'static [MemberDescriptor] {
        REQUIRED_PROXY_MEMBERS
    }

    fn get_leaf(&self, name: &str) -> Option<Value> {
        match name {
            "text" => to_ron_value(&self.text).ok(),
            _ => None,
        }
    }

    fn set_leaf(&mut self, name: &str, value: Value) -> bool {
        match name {
            "text" => assign_from_value(&mut self.text, &value),
            _ => false,
        }
    }

    fn composite(&self, name: &str) -> Option<CompositeRef<'_>> {
        match name {
            "proxy" => Some(CompositeRef::Present(&self.proxy)),
            _ => None,
        }
    }

    fn composite_mut(&mut self, name: &str) -> Option<CompositeMut<'_>> {
        match name {
            "proxy" => Some(CompositeMut::Present(&mut self.proxy)),
            _ => None,
        }
    }

    fn clear_composite(&mut self, _name: &str) -> bool {
        false
    }

    fn assign_composite(&mut self, name: &str, value: Value) -> bool {
        match name {
            "proxy" => assign_from_value(&mut self.proxy, &value),
            _ => false,
        }
    }

    fn to_value(&self) -> Result<Value, ConfigError> {
        to_ron_value(self)
    }

    fn transient(&self, value: Value) -> Result<Box<dyn ConfigObject>, ConfigError> {
        Ok(Box::new(from_ron_value::<Self>(&value)?))
    }
}
