//! Raw query-string extractor.
//!
//! Decodes an HTTP query string into a [`RawQuery`]: an ordered map whose
//! values are either plain strings (`role=admin`) or operator sub-maps
//! decoded from bracket notation (`price[gte]=10`). The tagged
//! representation lets the query translator branch exhaustively instead
//! of inspecting value types at runtime.

use std::collections::BTreeMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
};

/// A single raw query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// A plain `key=value` pair.
    Single(String),

    /// Bracketed operator pairs for one field, e.g. `price[gte]=10`
    /// and `price[lte]=50` become `{"gte": "10", "lte": "50"}`.
    Operators(BTreeMap<String, String>),
}

/// The decoded query-string parameter map for one request.
///
/// Keys are ordered (BTreeMap), so translating the same query twice
/// yields structurally identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    entries: BTreeMap<String, QueryValue>,
}

impl RawQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a RawQuery from decoded key/value pairs.
    ///
    /// Keys of the form `field[op]` are folded into an operator sub-map
    /// for `field`. A plain pair for a key that already holds operators
    /// replaces them (last write wins), mirroring how query-string
    /// parsers resolve duplicate keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Self::new();
        for (key, value) in pairs {
            query.insert(key.into(), value.into());
        }
        query
    }

    fn insert(&mut self, key: String, value: String) {
        if let Some((field, op)) = split_bracket_key(&key) {
            let entry = self
                .entries
                .entry(field.to_string())
                .or_insert_with(|| QueryValue::Operators(BTreeMap::new()));
            match entry {
                QueryValue::Operators(ops) => {
                    ops.insert(op.to_string(), value);
                }
                QueryValue::Single(_) => {
                    let mut ops = BTreeMap::new();
                    ops.insert(op.to_string(), value);
                    *entry = QueryValue::Operators(ops);
                }
            }
        } else {
            self.entries.insert(key, QueryValue::Single(value));
        }
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.get(key)
    }

    /// Returns the plain string value for a key, if it is a plain pair.
    pub fn single(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(QueryValue::Single(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns an iterator over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.entries.iter()
    }

    /// Returns true when the query string was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits `field[op]` into `(field, op)`; returns `None` for plain keys.
///
/// Keys with stray or empty brackets are treated as plain keys rather
/// than rejected.
fn split_bracket_key(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let rest = &key[open + 1..];
    let close = rest.find(']')?;
    // Nothing may follow the closing bracket.
    if open == 0 || close + 1 != rest.len() || rest[..close].is_empty() {
        return None;
    }
    Some((&key[..open], &rest[..close]))
}

impl<S> FromRequestParts<S> for RawQuery
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid query parameters"))?;

        Ok(RawQuery::from_pairs(pairs))
    }
}
