use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// A present query parameter: one non-blank string, or a repeated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multiple,
}

impl ParamValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(s) => Some(s),
            ParamValue::Multiple => None,
        }
    }
}

/// Query string parameters as the catalog sees them.
///
/// A key given more than once is a list, not a string. `get` treats it as
/// if it had not been given at all; `value` reports it as `Multiple`.
#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, Option<String>>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(String, String)>::deserialize(deserializer)?;
        Ok(QueryParams::from_pairs(pairs))
    }
}

impl QueryParams {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map: HashMap<String, Option<String>> = HashMap::new();
        for (k, v) in pairs {
            map.entry(k.into())
                .and_modify(|slot| *slot = None)
                .or_insert_with(|| Some(v.into()));
        }
        QueryParams { map }
    }

    /// Single value for `key`. Blank values count as missing.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map
            .get(key)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }

    /// Like `get`, but a repeated key shows up as `Multiple` instead of
    /// being dropped.
    pub fn value(&self, key: &str) -> Option<ParamValue> {
        match self.map.get(key)? {
            None => Some(ParamValue::Multiple),
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(ParamValue::Single(v.clone())),
        }
    }
}
