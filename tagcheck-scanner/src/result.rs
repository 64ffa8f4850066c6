use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered mapping from selector to presence.
///
/// Keys keep their first insertion position. Inserting a key again overwrites
/// its value in place, so the map never holds more than one entry per selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultMap {
    entries: Map<String, Value>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Map::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, selector: impl Into<String>, present: bool) {
        self.entries.insert(selector.into(), Value::Bool(present));
    }

    pub fn get(&self, selector: &str) -> Option<bool> {
        self.entries.get(selector).and_then(Value::as_bool)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(key, present)| (key.as_str(), present.as_bool().unwrap_or(false)))
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of selectors that matched at least one element
    pub fn present_count(&self) -> usize {
        self.entries
            .values()
            .filter(|present| present.as_bool() == Some(true))
            .count()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ResultMap {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut map = ResultMap::new();
        for (selector, present) in iter {
            map.insert(selector, present);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_insertion_order() {
        let mut map = ResultMap::new();
        map.insert("h1", true);
        map.insert("#missing", false);
        map.insert("a[href]", true);

        let keys: Vec<&str> = map.selectors().collect();
        assert_eq!(keys, vec!["h1", "#missing", "a[href]"]);
    }

    #[test]
    fn test_duplicate_insert_overwrites_in_place() {
        let mut map = ResultMap::new();
        map.insert("h1", false);
        map.insert("p", true);
        map.insert("h1", true);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("h1"), Some(true));
        assert_eq!(map.selectors().next(), Some("h1"));
    }

    #[test]
    fn test_present_count() {
        let map: ResultMap = [("a", true), ("b", false), ("c", true)].into_iter().collect();
        assert_eq!(map.present_count(), 2);
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_large_map_keeps_order_and_lookups() {
        let map: ResultMap = (0..5000).map(|i| (format!("#item-{}", i), i % 2 == 0)).collect();

        assert_eq!(map.len(), 5000);
        assert_eq!(map.get("#item-4998"), Some(true));
        assert_eq!(map.get("#item-4999"), Some(false));
        assert_eq!(map.selectors().next(), Some("#item-0"));
        assert_eq!(map.selectors().last(), Some("#item-4999"));
        assert_eq!(map.present_count(), 2500);
    }

    #[test]
    fn test_serializes_as_object_in_order() {
        let map: ResultMap = [("z", true), ("a", false)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"z":true,"a":false}"#);
    }

    #[test]
    fn test_deserializes_in_document_order() {
        let map: ResultMap = serde_json::from_str(r#"{"z": false, "a": true}"#).unwrap();
        let keys: Vec<&str> = map.selectors().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(map.get("a"), Some(true));
    }
}
