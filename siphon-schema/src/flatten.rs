//! Record flattening.
//!
//! A nested JSON record becomes a single-level mapping whose keys are built
//! with the same path rule as derived column names: nested objects contribute
//! `parent_child` keys, lists of scalars collapse into one delimited text
//! value, and lists holding objects are dropped.
//!
//! Null values and empty lists are dropped too. They carry no value, and
//! leaving them out keeps every key of a flattened record a derived column
//! name; the missing column reads as NULL when the row is inserted.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::{
    ColumnPath, Columns, Error, Result, SkipReason,
    walk::{Shape, Step, Visitor, walk},
};

/// Delimiter between the elements of a flattened list.
///
/// Backslashes and commas inside elements are escaped with a backslash, so
/// [`decode_list`] can always split the value back into its elements.
pub const LIST_DELIMITER: &str = ", ";

/// A scalar value of a flattened record.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl FlatValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FlatValue::Null)
    }

    /// The value as column text, or `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FlatValue::Null => None,
            FlatValue::Bool(b) => Some(b.to_string()),
            FlatValue::Number(n) => Some(n.to_string()),
            FlatValue::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("NULL"),
        }
    }
}

static NULL: FlatValue = FlatValue::Null;

/// A flattened record: flat column name to scalar value.
///
/// When two record paths flatten to the same name, the first one in record
/// key order owns the name. The others are kept aside with their paths so
/// [`FlatRecord::project`] can bind the value whose path matches the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    values: IndexMap<String, FlatValue>,
    shadowed: Vec<(ColumnPath, FlatValue)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value unless the key is already present. Returns false if the
    /// key was taken.
    pub fn insert(&mut self, name: impl Into<String>, value: FlatValue) -> bool {
        match self.values.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FlatValue> {
        self.values.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values for `columns` in column order. Absent keys read as null; keys
    /// that are not columns are ignored.
    ///
    /// A colliding value whose path is the column's own path is preferred
    /// over the one that owns the flat name.
    pub fn project<'a>(&'a self, columns: &Columns) -> Vec<&'a FlatValue> {
        columns
            .iter()
            .map(|spec| {
                self.shadowed
                    .iter()
                    .find(|(path, _)| path == spec.path())
                    .map(|(_, value)| value)
                    .or_else(|| self.values.get(spec.name()))
                    .unwrap_or(&NULL)
            })
            .collect()
    }

    /// Keys that have no column in `columns`, in record order.
    pub fn unmatched<'a>(&'a self, columns: &'a Columns) -> impl Iterator<Item = &'a str> {
        self.keys().filter(|key| !columns.contains(key))
    }
}

impl<K: Into<String>> FromIterator<(K, FlatValue)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, FlatValue)>>(iter: I) -> Self {
        let mut record = FlatRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Flatten one record.
///
/// Pure: the result depends on `record` alone.
pub fn flatten(record: &Map<String, Value>) -> FlatRecord {
    let mut flattener = Flattener::default();
    walk(&RecordNode(record), &ColumnPath::root(), &mut flattener);
    flattener.record
}

/// Flatten a record given as any JSON value.
///
/// # Errors
///
/// Fails with [`Error::NotAnObject`] unless `value` is a JSON object.
pub fn flatten_value(value: &Value) -> Result<FlatRecord> {
    match value {
        Value::Object(map) => Ok(flatten(map)),
        other => Err(Error::NotAnObject {
            found: json_type_name(other),
        }),
    }
}

/// Join a list of scalars into one text value.
///
/// Returns `None` if an object appears anywhere in the list. Elements render
/// as their text (null as empty text); nested lists render as compact JSON.
pub fn encode_list(items: &[Value]) -> Option<String> {
    if items.iter().any(contains_object) {
        return None;
    }

    let elements: Vec<String> = items
        .iter()
        .map(|item| escape_element(&element_text(item)))
        .collect();
    Some(elements.join(LIST_DELIMITER))
}

/// Split a value produced by [`encode_list`] back into its elements.
pub fn decode_list(text: &str) -> Vec<String> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ',' => {
                elements.push(std::mem::take(&mut current));
                if chars.peek() == Some(&' ') {
                    chars.next();
                }
            }
            _ => current.push(c),
        }
    }
    elements.push(current);
    elements
}

fn contains_object(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().any(contains_object),
        _ => false,
    }
}

fn element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn escape_element(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == ',' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A JSON object positioned in the traversal.
struct RecordNode<'a>(&'a Map<String, Value>);

impl<'a> Shape<'a> for RecordNode<'a> {
    type Leaf = FlatValue;

    fn steps(&self) -> Vec<(&'a str, Step<FlatValue, Self>)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), classify(value)))
            .collect()
    }
}

fn classify(value: &Value) -> Step<FlatValue, RecordNode<'_>> {
    match value {
        Value::Null => Step::Skip(SkipReason::Null),
        Value::Bool(b) => Step::Leaf(FlatValue::Bool(*b)),
        Value::Number(n) => Step::Leaf(FlatValue::Number(n.clone())),
        Value::String(s) => Step::Leaf(FlatValue::Text(s.clone())),
        Value::Array(items) if items.is_empty() => Step::Skip(SkipReason::EmptyList),
        Value::Array(items) => match encode_list(items) {
            Some(text) => Step::Leaf(FlatValue::Text(text)),
            None => Step::Skip(SkipReason::ObjectList),
        },
        Value::Object(map) => Step::Object(RecordNode(map)),
    }
}

#[derive(Default)]
struct Flattener {
    record: FlatRecord,
}

impl Visitor<FlatValue> for Flattener {
    fn leaf(&mut self, path: &ColumnPath, value: FlatValue) {
        let name = path.flat_name();
        if self.record.values.contains_key(&name) {
            tracing::trace!(field = %path, name = %name, "flat name already taken");
            self.record.shadowed.push((path.clone(), value));
        } else {
            self.record.values.insert(name, value);
        }
    }

    fn skip(&mut self, path: &ColumnPath, reason: SkipReason) {
        tracing::trace!(field = %path, %reason, "dropping value");
    }
}
