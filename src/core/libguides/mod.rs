pub mod backend;
pub mod connector;
pub mod query;
pub mod response;

pub use backend::Backend;
pub use connector::Connector;
pub use query::{QueryBuilder, QueryInput};
pub use response::{LibGuidesRecord, RecordCollection, RecordCollectionFactory};

use std::collections::BTreeMap;

pub const SOURCE_IDENTIFIER: &str = "LibGuides";

/// Multi-valued request parameters, serialized as repeated query keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamBag {
    params: BTreeMap<String, Vec<String>>,
}

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 覆寫 key 的所有值
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), vec![value.into()]);
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(|values| values.as_slice())
    }

    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(|value| value.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.params.remove(key)
    }

    /// Append every value of `other`, keeping existing ones.
    pub fn merge_with(&mut self, other: ParamBag) {
        for (key, values) in other.params {
            self.params.entry(key).or_default().extend(values);
        }
    }

    /// Replace keys present in `other` with its values.
    pub fn overlay(&mut self, other: &ParamBag) {
        for (key, values) in &other.params {
            self.params.insert(key.clone(), values.clone());
        }
    }

    /// Replace blank values of `key` with `replacement`.
    pub fn replace_empty(&mut self, key: &str, replacement: &str) {
        if let Some(values) = self.params.get_mut(key) {
            for value in values.iter_mut() {
                if value.trim().is_empty() {
                    *value = replacement.to_string();
                }
            }
        }
    }

    pub fn request_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key.clone(), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_with_appends_values() {
        let mut bag = ParamBag::new();
        bag.set("search", "maps");
        let mut other = ParamBag::new();
        other.add("search", "atlas");
        other.set("type", "guides");

        bag.merge_with(other);
        assert_eq!(bag.get("search").unwrap(), ["maps", "atlas"]);
        assert_eq!(bag.get_first("type"), Some("guides"));
    }

    #[test]
    fn test_overlay_replaces_values() {
        let mut bag = ParamBag::new();
        bag.set("type", "guides");
        bag.set("more", "false");
        let mut other = ParamBag::new();
        other.set("type", "azlist");

        bag.overlay(&other);
        assert_eq!(bag.get("type").unwrap(), ["azlist"]);
        assert_eq!(bag.get_first("more"), Some("false"));
    }

    #[test]
    fn test_replace_empty() {
        let mut bag = ParamBag::new();
        bag.add("search", "");
        bag.add("search", "history");
        bag.replace_empty("search", "default");
        assert_eq!(bag.get("search").unwrap(), ["default", "history"]);
    }

    #[test]
    fn test_request_pairs_repeat_keys() {
        let mut bag = ParamBag::new();
        bag.add("a", "1");
        bag.add("a", "2");
        bag.set("b", "3");
        assert!(bag.has("b"));
        assert_eq!(
            bag.request_pairs(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string()),
                ("b".to_string(), "3".to_string()),
            ]
        );
        assert_eq!(bag.remove("b"), Some(vec!["3".to_string()]));
        assert!(!bag.has("b"));
    }
}
