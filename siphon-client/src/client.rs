use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::{Value, json};
use siphon_schema::INTROSPECTION_QUERY;

use crate::{Error, RequestKind, Result, decode_response, records_at};

const DEFAULT_USER_AGENT: &str = concat!("siphon/", env!("CARGO_PKG_VERSION"));

/// Something that answers introspection and data queries.
pub trait Endpoint {
    /// Run the introspection query and return the whole response document.
    fn introspect(&self) -> Result<Value>;

    /// Run `query` and return the records listed at `data.<field>`.
    fn fetch_records(&self, query: &str, field: &str) -> Result<Vec<Value>>;
}

/// A GraphQL endpoint reached over HTTP.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    url: String,
}

impl GraphQlClient {
    /// A client with default settings.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::builder(url).build()
    }

    pub fn builder(url: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            url: url.into(),
            timeout: None,
            user_agent: None,
            headers: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `query` and check the response.
    pub fn execute(&self, kind: RequestKind, query: &str) -> Result<Value> {
        tracing::debug!(url = %self.url, %kind, "sending query");

        let transport = |source| Error::Transport {
            url: self.url.clone(),
            source,
        };
        let response = self
            .http
            .post(&self.url)
            .json(&json!({ "query": query }))
            .send()
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(transport)?;
        tracing::debug!(%kind, status, bytes = body.len(), "received response");

        decode_response(kind, status, &body)
    }
}

impl Endpoint for GraphQlClient {
    fn introspect(&self) -> Result<Value> {
        self.execute(RequestKind::Introspection, INTROSPECTION_QUERY)
    }

    fn fetch_records(&self, query: &str, field: &str) -> Result<Vec<Value>> {
        let document = self.execute(RequestKind::Data, query)?;
        let records = records_at(document, field)?;
        tracing::debug!(field, records = records.len(), "fetched records");
        Ok(records)
    }
}

/// Settings for a [`GraphQlClient`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
}

impl ClientBuilder {
    /// Timeout for a whole request. No timeout by default.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Send an extra header with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<GraphQlClient> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let invalid = || Error::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(GraphQlClient {
            http: builder.build().map_err(Error::Build)?,
            url: self.url,
        })
    }
}
