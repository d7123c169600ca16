use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key consumed while deriving flex alignment. Never emitted as CSS.
const SYNTHETIC_ALIGN: &str = "align";

/// Ordered CSS property map keyed by camelCase property names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssProperties(IndexMap<String, String>);

impl CssProperties {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build a property map from a serializable style record.
    ///
    /// Top-level string and number fields become properties; nulls, nested
    /// objects and arrays are skipped.
    pub fn from_serializable<T: Serialize>(style: &T) -> Self {
        let mut properties = Self::new();

        if let Ok(Value::Object(fields)) = serde_json::to_value(style) {
            for (name, value) in fields {
                match value {
                    Value::String(s) => properties.set(name, s),
                    Value::Number(n) => properties.set(name, n.to_string()),
                    _ => {}
                }
            }
        }

        properties
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn set_opt(&mut self, name: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    /// Merge `other` on top of `self`; later values win
    pub fn extend(&mut self, other: CssProperties) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to an inline `style` attribute value.
    ///
    /// Names are converted to kebab-case, empty values are dropped and the
    /// synthetic `align` key is never written.
    pub fn to_css_string(&self) -> String {
        self.0
            .iter()
            .filter(|(name, value)| name.as_str() != SYNTHETIC_ALIGN && !value.trim().is_empty())
            .map(|(name, value)| format!("{}: {};", camel_to_kebab(name), value.trim()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CssProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (name, value) in iter {
            properties.set(name, value);
        }
        properties
    }
}

/// Convert a camelCase property name to kebab-case.
///
/// A leading capital marks a vendor prefix: `WebkitBoxShadow` becomes
/// `-webkit-box-shadow`. Names already in kebab-case pass through.
pub fn camel_to_kebab(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);

    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            result.push('-');
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}
