use std::fmt;

use serde_json::Value;

use crate::{Error, Result};

/// Which kind of query a response answers. Decides the error reported for a
/// failed HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Introspection,
    Data,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Introspection => f.write_str("introspection"),
            RequestKind::Data => f.write_str("data"),
        }
    }
}

/// Check an HTTP response and parse its body into the response document.
///
/// GraphQL errors that come with data are logged and otherwise ignored.
pub fn decode_response(kind: RequestKind, status: u16, body: &str) -> Result<Value> {
    if status != 200 {
        tracing::debug!(%kind, status, body = %truncate(body, 200), "request failed");
        return Err(match kind {
            RequestKind::Introspection => Error::IntrospectionFetch { status },
            RequestKind::Data => Error::DataFetch { status },
        });
    }

    let document: Value =
        serde_json::from_str(body).map_err(|source| Error::Decode { kind, source })?;

    let messages = error_messages(&document);
    let has_data = document.get("data").is_some_and(|data| !data.is_null());

    if !has_data {
        if !messages.is_empty() {
            return Err(Error::GraphQl { kind, messages });
        }
        return Err(Error::MissingData { kind });
    }
    for message in &messages {
        tracing::warn!(%kind, %message, "query returned a partial error");
    }

    Ok(document)
}

/// The list at `data.<field>` of a response document.
pub fn records_at(document: Value, field: &str) -> Result<Vec<Value>> {
    let missing = || Error::MissingField {
        field: field.to_string(),
    };

    let Value::Object(mut root) = document else {
        return Err(missing());
    };
    let Some(Value::Object(mut data)) = root.remove("data") else {
        return Err(missing());
    };

    match data.remove(field) {
        Some(Value::Array(records)) => Ok(records),
        None | Some(Value::Null) => Err(missing()),
        Some(other) => Err(Error::NotAList {
            field: field.to_string(),
            found: json_type_name(&other),
        }),
    }
}

fn error_messages(document: &Value) -> Vec<String> {
    let Some(Value::Array(errors)) = document.get("errors") else {
        return Vec::new();
    };

    errors
        .iter()
        .map(|error| match error.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => error.to_string(),
        })
        .collect()
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

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
