use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered string key–value metadata, used for both labels and annotations.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaMap(pub BTreeMap<String, String>);

impl MetaMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert or overwrite an entry.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), val.into());
        self
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Iterate through all entries as `(&str, &str)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for MetaMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Identity and metadata shared by groups and instances.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name, unique within its scope (cluster for groups, group for instances).
    pub name: String,
    #[serde(default, skip_serializing_if = "MetaMap::is_empty")]
    pub labels: MetaMap,
    #[serde(default, skip_serializing_if = "MetaMap::is_empty")]
    pub annotations: MetaMap,
}

impl ObjectMeta {
    /// Create metadata with a name and no labels or annotations.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_and_chains() {
        let mut m = MetaMap::new();
        m.insert("a", "1").insert("b", "2").insert("a", "3");

        assert_eq!(m.len(), 2);
        assert_eq!(m.get("a"), Some("3"));
        assert_eq!(m.get("b"), Some("2"));
        assert!(m.get("c").is_none());
    }

    #[test]
    fn collects_from_pairs_in_key_order() {
        let m: MetaMap = [("zeta", "z"), ("alpha", "a")].into_iter().collect();
        let keys: Vec<_> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }

    #[test]
    fn object_meta_deserializes_without_maps() {
        let meta: ObjectMeta = serde_json::from_str(r#"{"name":"team-a"}"#).unwrap();
        assert_eq!(meta.name, "team-a");
        assert!(meta.labels.is_empty());
        assert!(meta.annotations.is_empty());
    }

    #[test]
    fn object_meta_skips_empty_maps_when_serialized() {
        let mut meta = ObjectMeta::named("job-1");
        meta.labels.insert("app", "batch");

        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"labels\":{\"app\":\"batch\"}"));
        assert!(!json.contains("annotations"));
    }
}
