//! Conditions, key conditions, filters and update expressions.
//!
//! Both backends consume the same values: the in-memory store evaluates them
//! directly and the DynamoDB store renders them into expression strings.

use serde_json::Value;

use crate::document::{text_attr, values_match, Document, KeyValue};

/// Predicate a conditional write checks against the currently stored item.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// No item exists under the written key.
    ItemNotExists,
    /// An item exists under the written key.
    ItemExists,
    /// The item exists and the attribute equals the value.
    AttributeEquals(String, Value),
    /// The item exists and its counter attribute equals `version`; an absent
    /// attribute reads as version 0.
    VersionEquals { attribute: String, version: u64 },
}

impl Condition {
    pub fn attribute_equals(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::AttributeEquals(name.into(), value.into())
    }

    pub fn version_equals(attribute: impl Into<String>, version: u64) -> Self {
        Self::VersionEquals {
            attribute: attribute.into(),
            version,
        }
    }

    pub fn evaluate(&self, current: Option<&Document>) -> bool {
        match (self, current) {
            (Self::ItemNotExists, current) => current.is_none(),
            (Self::ItemExists, current) => current.is_some(),
            (Self::AttributeEquals(name, expected), Some(doc)) => doc
                .get(name)
                .is_some_and(|actual| values_match(actual, expected)),
            (Self::VersionEquals { attribute, version }, Some(doc)) => {
                read_version(doc, attribute) == Some(*version)
            }
            (_, None) => false,
        }
    }
}

/// Reads a non-negative counter attribute. Absent reads as 0; anything that
/// is not a non-negative integer yields `None`.
pub fn read_version(doc: &Document, attribute: &str) -> Option<u64> {
    match doc.get(attribute) {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}

/// Restriction on the sort key inside a single partition.
#[derive(Debug, Clone, PartialEq)]
pub enum SortCondition {
    BeginsWith(String),
    Equals(KeyValue),
}

impl SortCondition {
    pub fn matches(&self, sort: Option<&KeyValue>) -> bool {
        match (self, sort) {
            (Self::BeginsWith(prefix), Some(KeyValue::S(value))) => value.starts_with(prefix),
            (Self::BeginsWith(prefix), Some(KeyValue::N(value))) => {
                value.to_string().starts_with(prefix)
            }
            (Self::Equals(expected), Some(value)) => expected == value,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Exact equality; numbers compare by value.
    Eq(Value),
    /// Equality on the attribute's text rendering, so `3` matches `"3"`.
    EqText(String),
    /// Case-insensitive equality on the attribute's text rendering.
    EqIgnoreCase(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub attribute: String,
    pub op: FilterOp,
}

impl FilterClause {
    pub fn matches(&self, doc: &Document) -> bool {
        match &self.op {
            FilterOp::Eq(expected) => doc
                .get(&self.attribute)
                .is_some_and(|actual| values_match(actual, expected)),
            FilterOp::EqText(expected) => {
                text_attr(doc, &self.attribute).is_some_and(|actual| actual == expected.as_str())
            }
            FilterOp::EqIgnoreCase(expected) => text_attr(doc, &self.attribute)
                .is_some_and(|actual| actual.to_lowercase() == expected.to_lowercase()),
        }
    }
}

/// Conjunction of attribute predicates applied to scanned or queried items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<FilterClause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push(FilterClause {
            attribute: attribute.into(),
            op: FilterOp::Eq(value.into()),
        });
        self
    }

    pub fn eq_text(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push(FilterClause {
            attribute: attribute.into(),
            op: FilterOp::EqText(value.into()),
        });
        self
    }

    pub fn eq_ignore_case(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push(FilterClause {
            attribute: attribute.into(),
            op: FilterOp::EqIgnoreCase(value.into()),
        });
        self
    }

    /// Adds an equality clause only when `value` is present.
    pub fn eq_opt(self, attribute: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.eq(attribute, v),
            None => self,
        }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|c| c.matches(doc))
    }
}

/// Attribute names that an update may target, modelled as a closed set.
pub trait UpdatableField: Copy {
    fn attribute(self) -> &'static str;
}

/// Ordered list of `SET attr = value` assignments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    assignments: Vec<(String, Value)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(attribute, value);
        self
    }

    pub fn push(&mut self, attribute: impl Into<String>, value: impl Into<Value>) {
        let attribute = attribute.into();
        let value = value.into();
        match self.assignments.iter_mut().find(|(name, _)| *name == attribute) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((attribute, value)),
        }
    }

    pub fn set_field<F: UpdatableField>(self, field: F, value: impl Into<Value>) -> Self {
        self.set(field.attribute(), value)
    }

    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn apply(&self, doc: &mut Document) {
        for (name, value) in &self.assignments {
            doc.insert(name.clone(), value.clone());
        }
    }
}
