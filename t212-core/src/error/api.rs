//! Normalized HTTP error.
//!
//! Every non-success response from the brokerage, whatever its body looks
//! like, is folded into a single [`ApiError`] that keeps the status code,
//! the response body (structured when it parses as JSON, raw text
//! otherwise) and the request that caused it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::{ErrorSeverity, RequestContext};

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ErrorBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not valid JSON; kept verbatim.
    Text(String),
}

impl ErrorBody {
    /// Parses a response body, falling back to the raw text.
    ///
    /// # Examples
    ///
    /// ```
    /// use t212_core::error::ErrorBody;
    /// use serde_json::json;
    ///
    /// assert_eq!(
    ///     ErrorBody::parse(r#"{"code":"InvalidTicker"}"#),
    ///     ErrorBody::Json(json!({"code": "InvalidTicker"}))
    /// );
    /// assert_eq!(
    ///     ErrorBody::parse("Bad Gateway"),
    ///     ErrorBody::Text("Bad Gateway".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        serde_json::from_str::<Value>(text).map_or_else(|_| Self::Text(text.to_string()), Self::Json)
    }

    /// Returns the structured body, if any.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text body, if the response was not JSON.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                write!(f, "Response JSON: {pretty}")
            }
            Self::Text(text) => write!(f, "Response text: {text}"),
        }
    }
}

/// Normalized error for a non-success HTTP response.
///
/// # Examples
///
/// ```
/// use t212_core::error::{ApiError, ErrorBody, RequestContext};
/// use serde_json::json;
///
/// let context = RequestContext::new("DELETE", "equity/orders/42");
/// let error = ApiError::new(&context, 404, ErrorBody::Text("Not Found".into()));
///
/// assert_eq!(error.status, 404);
/// assert!(error.is_not_found());
/// assert!(error.to_string().contains("DELETE equity/orders/42"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP verb of the failed call.
    pub method: String,
    /// Path (relative to the base URL) of the failed call.
    pub path: String,
    /// HTTP status code.
    pub status: u16,
    /// Parsed or raw response body.
    pub body: ErrorBody,
    /// JSON body that was sent, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,
}

impl ApiError {
    /// Builds a normalized error from the originating request and response.
    #[must_use]
    pub fn new(context: &RequestContext, status: u16, body: ErrorBody) -> Self {
        Self {
            method: context.method().to_string(),
            path: context.path().to_string(),
            status,
            body,
            request: context.body().cloned(),
        }
    }

    /// Returns true for 429 responses.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns true for 404 responses.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns the brokerage error code from a JSON body, if present.
    ///
    /// The code is usually a string (`"InvalidTicker"`); numeric codes are
    /// rendered as their decimal text.
    #[must_use]
    pub fn error_code(&self) -> Option<String> {
        match self.body.as_json()?.get("code")? {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self.status {
            401 | 403 => ErrorSeverity::Fatal,
            404 => ErrorSeverity::Info,
            429 | 500..=599 => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Warning,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Api] {} {} failed with status {}\n{}",
            self.method, self.path, self.status, self.body
        )?;
        if let Some(request) = &self.request {
            let pretty = serde_json::to_string_pretty(request).map_err(|_| fmt::Error)?;
            write!(f, "\nRequest data: {pretty}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_context() -> RequestContext {
        RequestContext::new("POST", "equity/orders/market")
            .with_body(json!({"quantity": 1.5, "ticker": "X"}))
    }

    #[test]
    fn test_parse_json_body() {
        let body = ErrorBody::parse(r#"{"code":"InvalidTicker"}"#);
        assert_eq!(body.as_json(), Some(&json!({"code": "InvalidTicker"})));
        assert!(body.as_text().is_none());
    }

    #[test]
    fn test_parse_text_body() {
        let body = ErrorBody::parse("upstream timed out");
        assert_eq!(body.as_text(), Some("upstream timed out"));
        assert!(body.as_json().is_none());
    }

    #[test]
    fn test_parse_empty_body_is_text() {
        assert_eq!(ErrorBody::parse(""), ErrorBody::Text(String::new()));
    }

    #[test]
    fn test_new_keeps_request_body() {
        let error = ApiError::new(
            &order_context(),
            400,
            ErrorBody::Json(json!({"code": "InvalidTicker"})),
        );
        assert_eq!(error.method, "POST");
        assert_eq!(error.path, "equity/orders/market");
        assert_eq!(error.status, 400);
        assert_eq!(error.request, Some(json!({"quantity": 1.5, "ticker": "X"})));
        assert_eq!(error.error_code().as_deref(), Some("InvalidTicker"));
    }

    #[test]
    fn test_numeric_error_code() {
        let context = RequestContext::new("GET", "equity/orders");
        let error = ApiError::new(&context, 400, ErrorBody::Json(json!({"code": 1013})));
        assert_eq!(error.error_code().as_deref(), Some("1013"));
    }

    #[test]
    fn test_display_includes_request_data() {
        let error = ApiError::new(
            &order_context(),
            400,
            ErrorBody::Json(json!({"code": "InvalidTicker"})),
        );
        let rendered = error.to_string();
        assert!(rendered.contains("POST equity/orders/market failed with status 400"));
        assert!(rendered.contains("InvalidTicker"));
        assert!(rendered.contains("Request data"));
        assert!(rendered.contains("\"ticker\": \"X\""));
    }

    #[test]
    fn test_display_without_request_data() {
        let context = RequestContext::new("GET", "equity/portfolio");
        let error = ApiError::new(&context, 502, ErrorBody::Text("Bad Gateway".into()));
        let rendered = error.to_string();
        assert!(rendered.contains("Response text: Bad Gateway"));
        assert!(!rendered.contains("Request data"));
    }

    #[test]
    fn test_severity_by_status() {
        let context = RequestContext::new("GET", "equity/portfolio");
        let severity =
            |status| ApiError::new(&context, status, ErrorBody::Text(String::new())).severity();
        assert_eq!(severity(401), ErrorSeverity::Fatal);
        assert_eq!(severity(404), ErrorSeverity::Info);
        assert_eq!(severity(429), ErrorSeverity::Recoverable);
        assert_eq!(severity(503), ErrorSeverity::Recoverable);
        assert_eq!(severity(400), ErrorSeverity::Warning);
    }

    #[test]
    fn test_serde_roundtrip() {
        let error = ApiError::new(&order_context(), 429, ErrorBody::Text("slow down".into()));
        let json = serde_json::to_string(&error).unwrap();
        let parsed: ApiError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, parsed);
    }
}
