//! Query translation.
//!
//! Converts a [`RawQuery`] into the persistence layer's filter predicate
//! and query options. This is the single place where query-string
//! conventions (reserved keys, bracket operators, `-field` sort tokens,
//! comma-separated lists) are interpreted.
//!
//! The translation is a pure, single-pass transform:
//!
//! 1. Reserved keys (`search`, `sort`, `page`, `limit`, `fields`) never
//!    become filter fields.
//! 2. `search=<v>` builds an OR group of case-insensitive substring
//!    matches, one per searchable field of the collection.
//! 3. Any other plain key becomes an equality constraint.
//! 4. Any other bracketed key becomes one numeric constraint per operator
//!    entry; operator names come from a closed set and values must parse
//!    as numbers, otherwise the whole query is rejected.
//! 5. `fields` and `sort` split on commas; a `-` prefix sorts descending.
//! 6. `page`/`limit` must be positive integers; `page` defaults to 1,
//!    `limit` to the caller-supplied default page size, and `offset` is
//!    always `(page - 1) * limit`.

use kin_persistence::error::QueryError;
use kin_persistence::types::{Condition, FilterPredicate, QueryOptions, SortDirective};

use super::{QueryValue, RawQuery};

/// Query keys that shape the result set instead of filtering fields.
pub const RESERVED_KEYS: &[&str] = &["search", "sort", "page", "limit", "fields"];

/// The outcome of translating one request's query string.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    /// WHERE-style constraints, combined with AND.
    pub filters: FilterPredicate,

    /// Pagination, sorting, and projection parameters.
    pub queries: QueryOptions,
}

/// Translates a raw query into `(filters, queries)` for a collection
/// whose free-text search covers `searchable_fields`, using the stock
/// default page size.
///
/// Pure and stateless: the same input always yields the same output.
pub fn filter_query(
    raw: &RawQuery,
    searchable_fields: &[&str],
) -> Result<TranslatedQuery, QueryError> {
    filter_query_with_limit(raw, searchable_fields, QueryOptions::DEFAULT_LIMIT)
}

/// Like [`filter_query`], but queries without an explicit `limit` fall
/// back to `default_limit` (the server's configured default page size).
pub fn filter_query_with_limit(
    raw: &RawQuery,
    searchable_fields: &[&str],
    default_limit: u64,
) -> Result<TranslatedQuery, QueryError> {
    let mut filters = FilterPredicate::new();

    for (key, value) in raw.iter() {
        if key == "search" {
            if let QueryValue::Single(term) = value {
                filters.and(search_condition(term, searchable_fields)?);
            }
            continue;
        }
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }

        match value {
            QueryValue::Single(v) => filters.and(Condition::equals(key, v)),
            QueryValue::Operators(ops) => {
                for (op, v) in ops {
                    filters.and(operator_condition(key, op, v)?);
                }
            }
        }
    }

    let page = parse_positive(raw, "page", QueryOptions::DEFAULT_PAGE)?;
    let limit = parse_positive(raw, "limit", default_limit)?;
    let mut queries = QueryOptions::new(page, limit);

    if let Some(sort) = raw.single("sort") {
        queries.sort = sort
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(SortDirective::parse)
            .collect();
    }

    if let Some(fields) = raw.single("fields") {
        queries.fields = Some(
            fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect(),
        );
    }

    Ok(TranslatedQuery { filters, queries })
}

/// Builds the OR group for a `search` term.
fn search_condition(term: &str, searchable_fields: &[&str]) -> Result<Condition, QueryError> {
    if searchable_fields.is_empty() {
        return Err(QueryError::SearchNotSupported);
    }
    Ok(Condition::any(
        searchable_fields
            .iter()
            .map(|field| Condition::contains(*field, term))
            .collect(),
    ))
}

/// Builds one condition from a bracketed operator entry.
///
/// The operator set is closed: `eq`, `ne`, `gt`, `gte`, `lt`, `lte`, and
/// `in` (comma-separated numbers). Anything else is rejected.
fn operator_condition(field: &str, op: &str, value: &str) -> Result<Condition, QueryError> {
    if op.eq_ignore_ascii_case("in") {
        let values = value
            .split(',')
            .map(|v| parse_number(field, v.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Condition::one_of(field, values));
    }

    let op = op.parse().map_err(|_| QueryError::UnknownOperator {
        field: field.to_string(),
        op: op.to_string(),
    })?;
    Ok(Condition::compare(field, op, parse_number(field, value)?))
}

fn parse_number(field: &str, value: &str) -> Result<f64, QueryError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| QueryError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_positive(raw: &RawQuery, param: &str, default: u64) -> Result<u64, QueryError> {
    let Some(value) = raw.single(param) else {
        return Ok(default);
    };
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| QueryError::InvalidPagination {
            param: param.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kin_persistence::types::{CompareOp, SortDirection};

    fn translate(pairs: &[(&str, &str)], searchable: &[&str]) -> TranslatedQuery {
        let raw = RawQuery::from_pairs(pairs.iter().copied());
        filter_query(&raw, searchable).unwrap()
    }

    fn translate_err(pairs: &[(&str, &str)], searchable: &[&str]) -> QueryError {
        let raw = RawQuery::from_pairs(pairs.iter().copied());
        filter_query(&raw, searchable).unwrap_err()
    }

    #[test]
    fn test_empty_query_yields_defaults() {
        let result = translate(&[], &[]);
        assert!(result.filters.is_empty());
        assert_eq!(result.queries.page, 1);
        assert_eq!(result.queries.limit, 10);
        // Offset is always derived, including on the default path.
        assert_eq!(result.queries.offset, 0);
        assert!(result.queries.sort.is_empty());
        assert!(result.queries.fields.is_none());
    }

    #[test]
    fn test_offset_is_consistent_with_page_and_limit() {
        let result = translate(&[("page", "3"), ("limit", "20")], &[]);
        assert_eq!(result.queries.page, 3);
        assert_eq!(result.queries.limit, 20);
        assert_eq!(result.queries.offset, 40);
    }

    #[test]
    fn test_page_without_limit_uses_default_limit() {
        let result = translate(&[("page", "4")], &[]);
        assert_eq!(result.queries.limit, 10);
        assert_eq!(result.queries.offset, 30);
    }

    #[test]
    fn test_limit_without_page_stays_on_first_page() {
        let result = translate(&[("limit", "25")], &[]);
        assert_eq!(result.queries.page, 1);
        assert_eq!(result.queries.offset, 0);
    }

    #[test]
    fn test_sort_tokens() {
        let result = translate(&[("sort", "name,-age")], &[]);
        assert_eq!(result.queries.sort.len(), 2);
        assert_eq!(result.queries.sort[0].field, "name");
        assert_eq!(result.queries.sort[0].direction, SortDirection::Ascending);
        assert_eq!(result.queries.sort[1].field, "age");
        assert_eq!(result.queries.sort[1].direction, SortDirection::Descending);
    }

    #[test]
    fn test_fields_projection() {
        let result = translate(&[("fields", "name,email")], &[]);
        assert_eq!(
            result.queries.fields,
            Some(vec!["name".to_string(), "email".to_string()])
        );
    }

    #[test]
    fn test_search_builds_or_group_per_searchable_field() {
        let result = translate(&[("search", "john")], &["name", "email"]);
        assert_eq!(result.filters.len(), 1);
        match &result.filters.conditions[0] {
            Condition::Any(group) => {
                assert_eq!(
                    group,
                    &vec![
                        Condition::contains("name", "john"),
                        Condition::contains("email", "john"),
                    ]
                );
            }
            other => panic!("expected OR group, got {:?}", other),
        }
    }

    #[test]
    fn test_search_without_searchable_fields_is_rejected() {
        let err = translate_err(&[("search", "john")], &[]);
        assert_eq!(err, QueryError::SearchNotSupported);
    }

    #[test]
    fn test_operator_filters_combine_with_equality() {
        let result = translate(
            &[("price[gte]", "10"), ("price[lte]", "50"), ("role", "admin")],
            &[],
        );
        assert_eq!(result.filters.len(), 3);
        assert!(
            result
                .filters
                .conditions
                .contains(&Condition::compare("price", CompareOp::Gte, 10.0))
        );
        assert!(
            result
                .filters
                .conditions
                .contains(&Condition::compare("price", CompareOp::Lte, 50.0))
        );
        assert!(
            result
                .filters
                .conditions
                .contains(&Condition::equals("role", "admin"))
        );
    }

    #[test]
    fn test_in_operator() {
        let result = translate(&[("age[in]", "24, 45")], &[]);
        assert_eq!(
            result.filters.conditions,
            vec![Condition::one_of("age", vec![24.0, 45.0])]
        );
    }

    #[test]
    fn test_reserved_keys_never_become_filter_fields() {
        let result = translate(
            &[
                ("sort", "name"),
                ("page", "2"),
                ("limit", "5"),
                ("fields", "name"),
                ("search", "x"),
            ],
            &["name"],
        );
        // Only the search OR group may appear; sort/page/limit/fields
        // must not turn into equality constraints.
        assert_eq!(result.filters.len(), 1);
        assert!(matches!(result.filters.conditions[0], Condition::Any(_)));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = translate_err(&[("price[between]", "10")], &[]);
        assert_eq!(
            err,
            QueryError::UnknownOperator {
                field: "price".to_string(),
                op: "between".to_string(),
            }
        );
    }

    #[test]
    fn test_non_numeric_operator_value_is_rejected() {
        let err = translate_err(&[("price[gte]", "abc")], &[]);
        assert_eq!(
            err,
            QueryError::InvalidNumber {
                field: "price".to_string(),
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_page_values_are_rejected() {
        for bad in ["0", "-1", "abc", "1.5"] {
            let err = translate_err(&[("page", bad)], &[]);
            assert!(
                matches!(err, QueryError::InvalidPagination { ref param, .. } if param == "page"),
                "expected pagination error for page={}, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_configured_default_limit_applies_without_explicit_limit() {
        let raw = RawQuery::from_pairs([("page", "2")]);
        let result = filter_query_with_limit(&raw, &[], 25).unwrap();
        assert_eq!(result.queries.limit, 25);
        assert_eq!(result.queries.offset, 25);

        // An explicit limit still wins.
        let raw = RawQuery::from_pairs([("limit", "5")]);
        let result = filter_query_with_limit(&raw, &[], 25).unwrap();
        assert_eq!(result.queries.limit, 5);
    }

    #[test]
    fn test_translation_is_idempotent() {
        let raw = RawQuery::from_pairs([
            ("search", "kin"),
            ("price[gte]", "10"),
            ("sort", "-createdAt"),
            ("page", "2"),
        ]);
        let first = filter_query(&raw, &["name", "email"]).unwrap();
        let second = filter_query(&raw, &["name", "email"]).unwrap();
        assert_eq!(first, second);
    }
}
