//! In-memory collection store.
//!
//! Keeps every collection as an ordered list of JSON records behind an
//! `RwLock`. Predicates are evaluated directly against the deserialized
//! [`Value`] documents; constraints that reference missing or non-numeric
//! fields simply never match, they are not an error.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::core::{CollectionStore, FindResult};
use crate::error::{StoreError, StoreResult};
use crate::types::{Condition, FilterPredicate, QueryOptions, SortDirection, SortDirective};

/// An in-memory [`CollectionStore`] backed by a `HashMap` of record lists.
///
/// Records keep their insertion order, which is also the unsorted result
/// order for queries without a `sort`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given collections.
    ///
    /// Seed records pass through the same normalization as [`insert`]:
    /// missing ids and timestamps are filled in.
    ///
    /// [`insert`]: CollectionStore::insert
    pub fn seeded(collections: Vec<(&str, Vec<Value>)>) -> StoreResult<Self> {
        let store = Self::new();
        {
            let mut guard = store.collections.write();
            for (name, records) in collections {
                let list = guard.entry(name.to_string()).or_default();
                for record in records {
                    let record = normalize_record(record)?;
                    list.push(record);
                }
            }
        }
        Ok(store)
    }
}

#[async_trait::async_trait]
impl CollectionStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find(
        &self,
        collection: &str,
        filter: &FilterPredicate,
        options: &QueryOptions,
    ) -> StoreResult<FindResult> {
        let guard = self.collections.read();
        let records = guard.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        let mut matched: Vec<Value> = records
            .iter()
            .filter(|record| predicate_matches(record, filter))
            .cloned()
            .collect();
        let total = matched.len() as u64;

        if !options.sort.is_empty() {
            matched.sort_by(|a, b| compare_records(a, b, &options.sort));
        }

        let page: Vec<Value> = matched
            .into_iter()
            .skip(options.offset as usize)
            .take(options.limit as usize)
            .map(|record| project(record, options.fields.as_deref()))
            .collect();

        debug!(
            collection = %collection,
            total,
            returned = page.len(),
            "memory store find"
        );

        Ok(FindResult {
            total,
            records: page,
        })
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let guard = self.collections.read();
        let found = guard
            .get(collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned();
        Ok(found)
    }

    async fn insert(&self, collection: &str, record: Value) -> StoreResult<Value> {
        let record = normalize_record(record)?;
        let id = record_id(&record)
            .map(str::to_string)
            .unwrap_or_default();

        let mut guard = self.collections.write();
        let records = guard.entry(collection.to_string()).or_default();
        if records.iter().any(|r| record_id(r) == Some(id.as_str())) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            });
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> StoreResult<Vec<Value>> {
        // Normalize and validate the whole batch first; nothing is
        // written unless every record is storable.
        let mut normalized = Vec::with_capacity(records.len());
        for record in records {
            normalized.push(normalize_record(record)?);
        }

        let mut guard = self.collections.write();
        let existing = guard.entry(collection.to_string()).or_default();
        for (index, record) in normalized.iter().enumerate() {
            let id = record_id(record).unwrap_or_default();
            let duplicate = existing.iter().any(|r| record_id(r) == Some(id))
                || normalized[..index].iter().any(|r| record_id(r) == Some(id));
            if duplicate {
                return Err(StoreError::Duplicate {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            }
        }
        existing.extend_from_slice(&normalized);
        Ok(normalized)
    }

    async fn update(&self, collection: &str, id: &str, changes: Value) -> StoreResult<Value> {
        let Value::Object(changes) = changes else {
            return Err(StoreError::InvalidRecord {
                message: "update payload must be a JSON object".to_string(),
            });
        };

        let mut guard = self.collections.write();
        let records = guard
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;
        let record = records
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or_else(|| not_found(collection, id))?;

        let fields = record
            .as_object_mut()
            .expect("stored records are always objects");
        for (key, value) in changes {
            // The id is immutable once assigned.
            if key == "id" {
                continue;
            }
            fields.insert(key, value);
        }
        fields.insert("updatedAt".to_string(), Value::String(now_rfc3339()));

        Ok(record.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<Value> {
        let mut guard = self.collections.write();
        let records = guard
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;
        let position = records
            .iter()
            .position(|r| record_id(r) == Some(id))
            .ok_or_else(|| not_found(collection, id))?;
        Ok(records.remove(position))
    }

    async fn delete_all(&self, collection: &str) -> StoreResult<u64> {
        let mut guard = self.collections.write();
        let removed = guard
            .get_mut(collection)
            .map(|records| {
                let count = records.len() as u64;
                records.clear();
                count
            })
            .unwrap_or(0);
        debug!(collection = %collection, removed, "memory store truncate");
        Ok(removed)
    }

    async fn count(&self, collection: &str, filter: &FilterPredicate) -> StoreResult<u64> {
        let guard = self.collections.read();
        let count = guard
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| predicate_matches(record, filter))
                    .count() as u64
            })
            .unwrap_or(0);
        Ok(count)
    }
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Validates a record and fills in generated fields.
fn normalize_record(record: Value) -> StoreResult<Value> {
    let Value::Object(mut fields) = record else {
        return Err(StoreError::InvalidRecord {
            message: "records must be JSON objects".to_string(),
        });
    };

    // Ids are always stored as strings; numeric ids from seed data are
    // coerced so lookups by path segment work.
    match fields.get("id") {
        None => {
            fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        Some(Value::String(_)) => {}
        Some(Value::Number(n)) => {
            let id = n.to_string();
            fields.insert("id".to_string(), Value::String(id));
        }
        Some(_) => {
            return Err(StoreError::InvalidRecord {
                message: "record ids must be strings or numbers".to_string(),
            });
        }
    }
    let now = now_rfc3339();
    fields
        .entry("createdAt".to_string())
        .or_insert_with(|| Value::String(now.clone()));
    fields
        .entry("updatedAt".to_string())
        .or_insert_with(|| Value::String(now));

    Ok(Value::Object(fields))
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// Evaluates a full predicate (AND over conditions).
fn predicate_matches(record: &Value, filter: &FilterPredicate) -> bool {
    filter
        .conditions
        .iter()
        .all(|condition| condition_matches(record, condition))
}

fn condition_matches(record: &Value, condition: &Condition) -> bool {
    match condition {
        Condition::Equals { field, value } => field_as_string(record, field)
            .map(|actual| actual == *value)
            .unwrap_or(false),
        Condition::Contains { field, value } => field_as_string(record, field)
            .map(|actual| actual.to_lowercase().contains(&value.to_lowercase()))
            .unwrap_or(false),
        Condition::Compare { field, op, value } => field_as_number(record, field)
            .map(|actual| op.evaluate(actual, *value))
            .unwrap_or(false),
        Condition::OneOf { field, values } => field_as_number(record, field)
            .map(|actual| values.contains(&actual))
            .unwrap_or(false),
        Condition::Any(conditions) => conditions
            .iter()
            .any(|inner| condition_matches(record, inner)),
    }
}

/// Returns the string form of a scalar field, if present.
///
/// Numbers and booleans compare by their canonical string form, matching
/// how they arrive in a query string.
fn field_as_string(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_as_number(record: &Value, field: &str) -> Option<f64> {
    record.get(field)?.as_f64()
}

/// Orders two records by the sort directives; missing fields sort first.
fn compare_records(a: &Value, b: &Value, sort: &[SortDirective]) -> Ordering {
    for directive in sort {
        let ordering = compare_field(a.get(&directive.field), b.get(&directive.field));
        let ordering = match directive.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => value_sort_key(a).cmp(&value_sort_key(b)),
        },
    }
}

fn value_sort_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Applies a field projection, keeping the requested fields in order.
fn project(record: Value, fields: Option<&[String]>) -> Value {
    let Some(fields) = fields else {
        return record;
    };
    let Value::Object(source) = record else {
        return record;
    };

    let mut projected = Map::new();
    for field in fields {
        if let Some(value) = source.get(field) {
            projected.insert(field.clone(), value.clone());
        }
    }
    Value::Object(projected)
}
