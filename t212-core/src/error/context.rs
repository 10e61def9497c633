//! Request context attached to errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Transient descriptor of an in-flight call.
///
/// Only used to enrich error reporting; dropped once the call completes.
///
/// # Examples
///
/// ```
/// use t212_core::error::RequestContext;
/// use serde_json::json;
///
/// let context = RequestContext::new("POST", "equity/pies")
///     .with_body(json!({"name": "Core"}));
///
/// assert_eq!(context.method(), "POST");
/// assert_eq!(context.path(), "equity/pies");
/// assert!(context.body().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    method: String,
    path: String,
    body: Option<Value>,
}

impl RequestContext {
    /// Creates a context without a request body.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
        }
    }

    /// Attaches the JSON body that will be sent.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
