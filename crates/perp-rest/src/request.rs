//! Request description and canonicalization
//!
//! A [`RestRequest`] is what an endpoint wrapper builds. Preparing it yields
//! a [`PreparedRequest`] holding the exact strings that are both signed and
//! transmitted, so the two can never drift apart.

use std::collections::BTreeMap;

use perp_auth::CanonicalRequest;
use reqwest::Method;
use serde::Serialize;

use crate::error::{RestError, RestResult};

/// Content type for JSON bodies
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type for form bodies
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Query or form parameters, always iterated in key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Set a parameter only when a value is present
    pub fn insert_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Builder form of [`Params::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`Params::insert_opt`]
    pub fn with_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Form-urlencode in lexicographic key order
    pub fn encode(&self) -> RestResult<String> {
        serde_urlencoded::to_string(&self.0).map_err(|e| RestError::InvalidParameter(e.to_string()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    Empty,
    /// Sorted, form-urlencoded parameters
    Form(Params),
    /// Pre-serialized JSON text
    Json(String),
}

/// Whether a call needs credentials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Public,
    Private,
}

/// A logical API call
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: Method,
    /// Path relative to the exchange's API prefix
    pub path: String,
    pub query: Params,
    pub body: Body,
    pub access: Access,
}

impl RestRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: Body::Empty,
            access: Access::Public,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Mark the call as requiring credentials
    pub fn private(mut self) -> Self {
        self.access = Access::Private;
        self
    }

    pub fn is_private(&self) -> bool {
        self.access == Access::Private
    }

    /// Replace the query parameters
    pub fn query(mut self, params: Params) -> Self {
        self.query = params;
        self
    }

    /// Add one query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Add one query parameter when present
    pub fn param_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.insert_opt(key, value);
        self
    }

    /// Send parameters as a form body
    pub fn form(mut self, params: Params) -> Self {
        self.body = Body::Form(params);
        self
    }

    /// Serialize a payload once and send it as a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> RestResult<Self> {
        let text = serde_json::to_string(payload).map_err(RestError::Serialize)?;
        self.body = Body::Json(text);
        Ok(self)
    }

    /// Render the canonical strings under the given API prefix
    pub fn prepare(&self, prefix: &str) -> RestResult<PreparedRequest> {
        let query = self.query.encode()?;
        let (body, content_type) = match &self.body {
            Body::Empty => (String::new(), None),
            Body::Form(params) => (params.encode()?, Some(CONTENT_TYPE_FORM)),
            Body::Json(text) => (text.clone(), Some(CONTENT_TYPE_JSON)),
        };

        Ok(PreparedRequest {
            method: self.method.clone(),
            path: format!("{}{}", prefix, self.path),
            query,
            body,
            content_type,
        })
    }
}

/// A request ready to sign and send
///
/// Every field here is used verbatim both for the signature and on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    /// Full path including the API prefix
    pub path: String,
    /// Encoded query string without `?`
    pub query: String,
    /// Exact body text, empty when there is none
    pub body: String,
    pub content_type: Option<&'static str>,
}

impl PreparedRequest {
    /// View handed to the signer
    pub fn canonical(&self) -> CanonicalRequest<'_> {
        CanonicalRequest::new(self.method.as_str(), &self.path, &self.query, &self.body)
    }

    /// Absolute URL against a base such as `https://api.gateio.ws`
    pub fn url(&self, base_url: &str) -> String {
        if self.query.is_empty() {
            format!("{}{}", base_url, self.path)
        } else {
            format!("{}{}?{}", base_url, self.path, self.query)
        }
    }
}
