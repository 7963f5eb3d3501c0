use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Query string parameters, one value per key.
///
/// Repeated keys overwrite earlier ones. Keys are kept sorted so the
/// upstream URL is stable for a given set of parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    map: BTreeMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_str())
    }

    /// Like `get`, but treats a blank value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        QueryParams { map }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_value_overwrites() {
        let params: QueryParams = [("page", "1"), ("page", "3")].into_iter().collect();
        assert_eq!(params.get("page"), Some("3"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_get_non_empty() {
        let params: QueryParams = [("query", "  "), ("page", "2")].into_iter().collect();
        assert!(params.has("query"));
        assert_eq!(params.get_non_empty("query"), None);
        assert_eq!(params.get_non_empty("page"), Some("2"));
    }
}
