//! Filter predicate types.
//!
//! This module defines the structured representation of WHERE-style
//! constraints that list queries apply to a collection. A predicate is an
//! ordered set of conditions combined with logical AND; free-text search
//! produces a single OR group over the collection's searchable fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric comparison operators accepted in bracketed query filters.
///
/// This is a closed set: query keys like `price[gte]=10` are only accepted
/// when the bracketed operator names one of these variants (or `in`, which
/// maps to [`Condition::OneOf`]). Unrecognized operator names are rejected
/// at the query-translation boundary rather than passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "eq"),
            CompareOp::Ne => write!(f, "ne"),
            CompareOp::Gt => write!(f, "gt"),
            CompareOp::Gte => write!(f, "gte"),
            CompareOp::Lt => write!(f, "lt"),
            CompareOp::Lte => write!(f, "lte"),
        }
    }
}

impl FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eq" => Ok(CompareOp::Eq),
            "ne" => Ok(CompareOp::Ne),
            "gt" => Ok(CompareOp::Gt),
            "gte" => Ok(CompareOp::Gte),
            "lt" => Ok(CompareOp::Lt),
            "lte" => Ok(CompareOp::Lte),
            _ => Err(format!("unknown comparison operator: {}", s)),
        }
    }
}

impl CompareOp {
    /// Applies the comparison to two numbers.
    pub fn evaluate(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Gte => lhs >= rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Lte => lhs <= rhs,
        }
    }
}

/// A single field-level constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// The field's value equals the given string.
    Equals {
        /// The field name.
        field: String,
        /// The expected value.
        value: String,
    },

    /// The field's string value contains the given substring,
    /// case-insensitively.
    Contains {
        /// The field name.
        field: String,
        /// The substring to look for.
        value: String,
    },

    /// The field's numeric value satisfies a comparison.
    Compare {
        /// The field name.
        field: String,
        /// The comparison operator.
        op: CompareOp,
        /// The value to compare against.
        value: f64,
    },

    /// The field's numeric value is one of the given values (`in`).
    OneOf {
        /// The field name.
        field: String,
        /// The accepted values.
        values: Vec<f64>,
    },

    /// At least one of the inner conditions holds (OR group).
    Any(Vec<Condition>),
}

impl Condition {
    /// Creates an equality condition.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a case-insensitive substring condition.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a numeric comparison condition.
    pub fn compare(field: impl Into<String>, op: CompareOp, value: f64) -> Self {
        Condition::Compare {
            field: field.into(),
            op,
            value,
        }
    }

    /// Creates a membership condition over a set of numbers.
    pub fn one_of(field: impl Into<String>, values: Vec<f64>) -> Self {
        Condition::OneOf {
            field: field.into(),
            values,
        }
    }

    /// Creates an OR group.
    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Any(conditions)
    }
}

/// An ordered set of conditions, combined with logical AND.
///
/// An empty predicate matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// The conditions, in the order they were derived from the query.
    pub conditions: Vec<Condition>,
}

impl FilterPredicate {
    /// Creates an empty predicate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the predicate has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns the number of top-level conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Appends a condition to the AND set.
    pub fn and(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }
}

impl FromIterator<Condition> for FilterPredicate {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_op_parse() {
        assert_eq!("gte".parse::<CompareOp>(), Ok(CompareOp::Gte));
        assert_eq!("LT".parse::<CompareOp>(), Ok(CompareOp::Lt));
        assert!("between".parse::<CompareOp>().is_err());
    }

    #[test]
    fn test_compare_op_roundtrip() {
        for op in [
            CompareOp::Eq,
            CompareOp::Ne,
            CompareOp::Gt,
            CompareOp::Gte,
            CompareOp::Lt,
            CompareOp::Lte,
        ] {
            assert_eq!(op.to_string().parse::<CompareOp>(), Ok(op));
        }
    }

    #[test]
    fn test_compare_op_evaluate() {
        assert!(CompareOp::Gte.evaluate(10.0, 10.0));
        assert!(CompareOp::Gt.evaluate(11.0, 10.0));
        assert!(!CompareOp::Gt.evaluate(10.0, 10.0));
        assert!(CompareOp::Ne.evaluate(1.0, 2.0));
    }

    #[test]
    fn test_predicate_and() {
        let mut predicate = FilterPredicate::new();
        assert!(predicate.is_empty());

        predicate.and(Condition::equals("role", "admin"));
        predicate.and(Condition::compare("age", CompareOp::Gte, 18.0));

        assert_eq!(predicate.len(), 2);
    }
}
