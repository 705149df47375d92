//! Ordered key/value store with in-place overwrite.

use super::value::ParamValue;

/// Ordered parameter map.
///
/// Keys keep the position of their first insertion; overwriting a key
/// replaces the value without moving it. Values are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamStore {
    entries: Vec<(String, ParamValue)>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(key, value)` pairs in the given order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut store = Self::new();
        for (key, value) in pairs {
            store.set(key, value);
        }
        store
    }

    /// Store or overwrite a parameter. No type checking is done: a default
    /// integer can be replaced by a string.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render one `key = value` line per entry, in store order
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(&format!("{} = {}\n", key, value));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut store = ParamStore::from_pairs([("a", 1), ("b", 2), ("c", 3)]);
        store.set("a", 10);
        store.set("d", 4);

        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
        assert_eq!(store.get("a"), Some(&ParamValue::Int(10)));
    }

    #[test]
    fn test_type_can_change_on_overwrite() {
        let mut store = ParamStore::new();
        store.set("width", 32);
        store.set("width", "wide");
        assert_eq!(store.get("width"), Some(&ParamValue::from("wide")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_render_lines() {
        let mut store = ParamStore::new();
        store.set("is_full", true);
        store.set("eviction", "LRU");
        store.set("wr_ratio", 0.5);
        store.set("ranges", vec![[0u64, 1024u64]]);

        assert_eq!(
            store.render(),
            "is_full = true\neviction = \"LRU\"\nwr_ratio = 0.5\nranges = [[0, 1024]]\n"
        );
    }

    #[test]
    fn test_missing_key() {
        let store = ParamStore::new();
        assert!(store.get("delay").is_none());
        assert!(!store.contains("delay"));
        assert!(store.is_empty());
    }
}
