//! Documents and key values.
//!
//! A [`Document`] is a schema-less JSON object. Key attributes inside it are
//! read through [`KeyValue`], which is either a string or an integer; the
//! collection's [`KeySchema`](crate::collection::KeySchema) decides which.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::collection::{Collection, KeyKind};
use crate::error::{StoreError, StoreResult};

pub type Document = Map<String, Value>;

/// Separator used by composite sort keys such as `"<semester>#<subjectCode>"`.
pub const SORT_DELIMITER: char = '#';

/// Joins two logical fields into a composite key value.
pub fn composite(first: impl fmt::Display, second: impl fmt::Display) -> String {
    format!("{first}{SORT_DELIMITER}{second}")
}

/// Prefix that selects every composite key whose first field equals `first`.
///
/// The delimiter is part of the prefix, so `"1"` yields `"1#"` and never
/// matches keys belonging to `"10"`.
pub fn composite_prefix(first: impl fmt::Display) -> String {
    format!("{first}{SORT_DELIMITER}")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    S(String),
    N(i64),
}

impl KeyValue {
    /// Reads a key attribute out of a JSON value, coercing between the two
    /// encodings where the stored value is unambiguous.
    pub fn from_json(value: &Value, kind: KeyKind) -> Option<Self> {
        match (kind, value) {
            (KeyKind::String, Value::String(s)) if !s.is_empty() => Some(Self::S(s.clone())),
            (KeyKind::String, Value::Number(n)) => Some(Self::S(n.to_string())),
            (KeyKind::Number, Value::Number(n)) => n.as_i64().map(Self::N),
            (KeyKind::Number, Value::String(s)) => s.trim().parse().ok().map(Self::N),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::S(s) => Value::String(s.clone()),
            Self::N(n) => Value::Number(Number::from(*n)),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            Self::N(_) => None,
        }
    }
}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::N(a), Self::N(b)) => a.cmp(b),
            (Self::S(a), Self::S(b)) => a.cmp(b),
            (Self::N(_), Self::S(_)) => Ordering::Less,
            (Self::S(_), Self::N(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{s}"),
            Self::N(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        Self::N(value)
    }
}

/// Primary key of a single document: partition value plus optional sort value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    pub partition: KeyValue,
    pub sort: Option<KeyValue>,
}

impl Key {
    pub fn partition(value: impl Into<KeyValue>) -> Self {
        Self {
            partition: value.into(),
            sort: None,
        }
    }

    pub fn with_sort(mut self, value: impl Into<KeyValue>) -> Self {
        self.sort = Some(value.into());
        self
    }

    /// Extracts the primary key of `document` according to the collection's
    /// key schema.
    pub fn from_document(collection: Collection, document: &Document) -> StoreResult<Self> {
        let schema = collection.key_schema();
        let partition = document
            .get(schema.partition.name)
            .and_then(|v| KeyValue::from_json(v, schema.partition.kind))
            .ok_or_else(|| {
                StoreError::invalid_key(
                    collection.table_name(),
                    format!("missing or invalid {}", schema.partition.name),
                )
            })?;

        let sort = match schema.sort {
            Some(attr) => Some(
                document
                    .get(attr.name)
                    .and_then(|v| KeyValue::from_json(v, attr.kind))
                    .ok_or_else(|| {
                        StoreError::invalid_key(
                            collection.table_name(),
                            format!("missing or invalid {}", attr.name),
                        )
                    })?,
            ),
            None => None,
        };

        Ok(Self { partition, sort })
    }

    /// Checks that the key has exactly the parts the collection defines.
    pub fn validate(&self, collection: Collection) -> StoreResult<()> {
        let schema = collection.key_schema();
        match (&self.sort, schema.sort) {
            (None, Some(attr)) => Err(StoreError::invalid_key(
                collection.table_name(),
                format!("sort key {} required", attr.name),
            )),
            (Some(_), None) => Err(StoreError::invalid_key(
                collection.table_name(),
                "collection has no sort key",
            )),
            _ => Ok(()),
        }
    }

    /// Validates the key and coerces each part to the encoding its key
    /// attribute declares.
    pub fn normalize(&self, collection: Collection) -> StoreResult<Self> {
        self.validate(collection)?;
        let schema = collection.key_schema();
        let coerce = |value: &KeyValue, attr: crate::collection::KeyAttr| {
            KeyValue::from_json(&value.to_json(), attr.kind).ok_or_else(|| {
                StoreError::invalid_key(
                    collection.table_name(),
                    format!("{} must be {:?}", attr.name, attr.kind),
                )
            })
        };
        Ok(Self {
            partition: coerce(&self.partition, schema.partition)?,
            sort: match (&self.sort, schema.sort) {
                (Some(value), Some(attr)) => Some(coerce(value, attr)?),
                _ => None,
            },
        })
    }

    /// Coerces only the partition part, for partition-wide queries.
    pub fn normalize_partition(&self, collection: Collection) -> StoreResult<KeyValue> {
        let attr = collection.key_schema().partition;
        KeyValue::from_json(&self.partition.to_json(), attr.kind).ok_or_else(|| {
            StoreError::invalid_key(
                collection.table_name(),
                format!("{} must be {:?}", attr.name, attr.kind),
            )
        })
    }

    /// Key attributes as they appear inside a stored document.
    pub fn attributes(&self, collection: Collection) -> Vec<(&'static str, Value)> {
        let schema = collection.key_schema();
        let mut attrs = vec![(schema.partition.name, self.partition.to_json())];
        if let (Some(attr), Some(sort)) = (schema.sort, &self.sort) {
            attrs.push((attr.name, sort.to_json()));
        }
        attrs
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sort {
            Some(sort) => write!(f, "({}, {})", self.partition, sort),
            None => write!(f, "({})", self.partition),
        }
    }
}

/// Decodes a stored document into a typed record.
pub fn decode<T: DeserializeOwned>(document: Document) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Encodes a typed record into a document. Records must serialize to objects.
pub fn encode<T: Serialize>(record: &T) -> StoreResult<Document> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(format!(
            "expected an object document, got {other}"
        ))),
    }
}

/// Reads an attribute as text, rendering numbers and booleans the way they
/// were written.
pub fn text_attr<'a>(document: &'a Document, name: &str) -> Option<std::borrow::Cow<'a, str>> {
    match document.get(name)? {
        Value::String(s) => Some(std::borrow::Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(std::borrow::Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(std::borrow::Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Loose equality used by conditions and filters: numbers compare by value
/// regardless of integer or float encoding.
pub fn values_match(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => left == right,
    }
}
