//! Query parameter mapping and its wire encoding.

use crate::error::{RequestError, SqsError};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters that should NOT be percent-encoded (RFC 3986 unreserved set).
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a key or value for the query string and the canonical form.
pub fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_SET).to_string()
}

/// Request parameters as an ordered multimap.
///
/// Insertion order is kept for inspection, but [`QueryParams::encode`] always
/// produces the sorted canonical form, so two mappings holding the same pairs
/// encode identically regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing every existing value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.pairs.retain(|(k, _)| *k != key);
        self.pairs.push((key, value.into()));
        self
    }

    /// Add a value for a key, keeping existing values.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Builder-style [`QueryParams::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Remove every value for a key.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// First value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a key, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns true if the key has at least one value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs encoded and sorted by encoded key, then encoded value.
    pub fn sorted_encoded_pairs(&self) -> Vec<(String, String)> {
        let mut encoded: Vec<(String, String)> = self
            .pairs
            .iter()
            .map(|(k, v)| (uri_encode(k), uri_encode(v)))
            .collect();
        encoded.sort();
        encoded
    }

    /// Encode as `k=v&k2=v2` in canonical order.
    pub fn encode(&self) -> String {
        self.sorted_encoded_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse an encoded query string or form body.
    pub fn parse(query: &str) -> Result<Self, SqsError> {
        let mut params = QueryParams::new();

        for pair in query.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.append(decode_component(key)?, decode_component(value)?);
        }

        Ok(params)
    }
}

fn decode_component(component: &str) -> Result<String, SqsError> {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| {
            SqsError::Request(RequestError::InvalidQueryString {
                message: format!("'{}' is not valid UTF-8 once decoded: {}", component, e),
            })
        })
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.append(k, v);
        }
        params
    }
}
