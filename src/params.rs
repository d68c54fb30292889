use crate::{RelayError, Result};
use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Multi-valued parameters as produced by query and form parsers.
///
/// Each key maps to every value it was given, in the order they appeared.
pub type MultiValuedParams = IndexMap<String, Vec<String>>;

/// A set of single-valued form parameters.
///
/// Keys are unique and iteration follows insertion order, which is the order
/// used when the set is serialized into a request body, a query string or a
/// launch form. Re-inserting an existing key replaces its value but keeps
/// its original position.
///
/// # Examples
///
/// ```rust
/// use form_relay::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.insert("lti_message_type", "basic-lti-launch-request");
/// params.insert("resource_link_id", "429785226");
///
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("resource_link_id"), Some("429785226"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: IndexMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parameter set from `(key, value)` pairs.
    ///
    /// Later pairs win when a key repeats.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Insert a parameter, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a parameter, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = ParameterSet::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterSet {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, String);
    type IntoIter = IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Collapse multi-valued parameters into a [`ParameterSet`].
///
/// Only the first value of each key is kept; the rest are discarded. Keys
/// keep their order.
///
/// # Errors
///
/// Returns [`RelayError::EmptyValues`] if any key maps to an empty value
/// list. No partial result is produced in that case.
///
/// # Examples
///
/// ```rust
/// use form_relay::{flatten_parameter_map, MultiValuedParams};
///
/// let mut raw = MultiValuedParams::new();
/// raw.insert("a".to_string(), vec!["1".to_string(), "2".to_string()]);
///
/// let flat = flatten_parameter_map(&raw).unwrap();
/// assert_eq!(flat.get("a"), Some("1"));
/// ```
pub fn flatten_parameter_map(params: &MultiValuedParams) -> Result<ParameterSet> {
    let mut flat = ParameterSet::new();

    for (key, values) in params {
        let first = values
            .first()
            .ok_or_else(|| RelayError::EmptyValues { key: key.clone() })?;

        if values.len() > 1 {
            log::trace!(
                "Discarding {} extra value(s) for parameter '{key}'",
                values.len() - 1
            );
        }

        flat.insert(key.clone(), first.clone());
    }

    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi(entries: &[(&str, &[&str])]) -> MultiValuedParams {
        entries
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_flatten_keeps_first_value() {
        let flat = flatten_parameter_map(&multi(&[("a", &["1", "2"])])).unwrap();

        assert_eq!(flat, ParameterSet::from_pairs([("a", "1")]));
    }

    #[test]
    fn test_flatten_preserves_keys_and_order() {
        let raw = multi(&[
            ("oauth_nonce", &["n1"]),
            ("context_id", &["c1", "c2", "c3"]),
            ("user_id", &["u1"]),
        ]);

        let flat = flatten_parameter_map(&raw).unwrap();

        assert_eq!(
            flat.keys().collect::<Vec<_>>(),
            vec!["oauth_nonce", "context_id", "user_id"]
        );
        for (key, values) in &raw {
            assert_eq!(flat.get(key), Some(values[0].as_str()));
        }
    }

    #[test]
    fn test_flatten_rejects_empty_value_list() {
        let raw = multi(&[("ok", &["1"]), ("broken", &[])]);

        match flatten_parameter_map(&raw) {
            Err(RelayError::EmptyValues { key }) => assert_eq!(key, "broken"),
            other => panic!("Expected EmptyValues error, got: {other:?}"),
        }
    }

    #[test]
    fn test_flatten_empty_map() {
        let flat = flatten_parameter_map(&MultiValuedParams::new()).unwrap();
        assert!(flat.is_empty());
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut params = ParameterSet::from_pairs([("a", "1"), ("b", "2")]);
        let previous = params.insert("a", "3");

        assert_eq!(previous, Some("1".to_string()));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(params.get("a"), Some("3"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut params = ParameterSet::from_pairs([("a", "1"), ("b", "2"), ("c", "3")]);
        params.remove("a");

        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_serializes_as_json_object() {
        let params = ParameterSet::from_pairs([("z", "1"), ("a", "2")]);
        let json = serde_json::to_string(&params).unwrap();

        assert_eq!(json, r#"{"z":"1","a":"2"}"#);

        let back: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
