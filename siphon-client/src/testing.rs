//! An in-process [`Endpoint`] for tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{cell::RefCell, collections::HashMap};

use serde_json::Value;

use crate::{Endpoint, Error, Result, records_at};

/// Answers introspection with a fixed document and data queries with fixed
/// response documents keyed by root field.
#[derive(Debug, Default)]
pub struct StaticEndpoint {
    introspection: Option<Value>,
    documents: HashMap<String, Value>,
    queries: RefCell<Vec<String>>,
}

impl StaticEndpoint {
    pub fn new(introspection: Value) -> Self {
        Self {
            introspection: Some(introspection),
            ..Self::default()
        }
    }

    /// An endpoint whose introspection request fails with HTTP 503.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Answer queries for `field` with `records`.
    pub fn with_records(mut self, field: &str, records: Vec<Value>) -> Self {
        let document = serde_json::json!({ "data": { field: records } });
        self.documents.insert(field.to_string(), document);
        self
    }

    /// Answer queries for `field` with a raw response document.
    pub fn with_document(mut self, field: &str, document: Value) -> Self {
        self.documents.insert(field.to_string(), document);
        self
    }

    /// Data queries received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl Endpoint for StaticEndpoint {
    fn introspect(&self) -> Result<Value> {
        self.introspection
            .clone()
            .ok_or(Error::IntrospectionFetch { status: 503 })
    }

    fn fetch_records(&self, query: &str, field: &str) -> Result<Vec<Value>> {
        self.queries.borrow_mut().push(query.to_string());
        match self.documents.get(field) {
            Some(document) => records_at(document.clone(), field),
            None => Err(Error::DataFetch { status: 400 }),
        }
    }
}
