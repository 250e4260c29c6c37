//! module.prop key/value metadata.

use indexmap::IndexMap;

/// Flat string metadata written to `module.prop`.
///
/// Entries keep insertion order and are emitted verbatim as `key=value`
/// lines, no escaping.
#[derive(Debug, Clone, Default)]
pub struct ModuleMetadata {
    entries: IndexMap<String, String>,
}

impl ModuleMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value but keeping the key's
    /// original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `key=value` lines in insertion order.
    pub fn to_prop_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ModuleMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
