//! Configuration and per-call value types.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{Headers, HttpMethod};

/// Header every new client sends unless removed.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// State owned by one `ApiClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined to every endpoint by plain concatenation. May be empty.
    pub base_url: String,
    pub default_headers: Headers,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        let mut default_headers = Headers::new();
        default_headers.set(DEFAULT_CONTENT_TYPE.0, DEFAULT_CONTENT_TYPE.1);
        Self {
            base_url: base_url.to_string(),
            default_headers,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Options for a single call. Never retained by the client.
///
/// `method` falls back to GET when unset. `headers` override same-named
/// defaults for this call only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body to the JSON encoding of `data`.
    pub fn json<T: Serialize + ?Sized>(self, data: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(data).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.body(body))
    }
}

/// A successfully decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// The response declared a JSON content type.
    Json(serde_json::Value),
    /// Any other (or missing) content type; the raw body text.
    Text(String),
}

impl ParsedBody {
    pub fn is_json(&self) -> bool {
        matches!(self, ParsedBody::Json(_))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ParsedBody::Json(value) => Some(value),
            ParsedBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedBody::Text(text) => Some(text),
            ParsedBody::Json(_) => None,
        }
    }

    /// Converts a JSON body into `T`. A text body is parsed as JSON first.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ParsedBody::Json(value) => serde_json::from_value(value),
            ParsedBody::Text(text) => serde_json::from_str(&text),
        }
        .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[test]
    fn new_config_has_json_content_type() {
        let config = ClientConfig::new("https://api.test");
        assert_eq!(config.base_url, "https://api.test");
        assert_eq!(config.default_headers.get("Content-Type"), Some("application/json"));
        assert_eq!(config.default_headers.len(), 1);
    }

    #[test]
    fn default_config_has_empty_base_url() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_empty());
        assert!(config.default_headers.contains("content-type"));
    }

    #[test]
    fn options_builder() {
        let options = RequestOptions::new()
            .method(HttpMethod::Put)
            .header("X-Test", "1")
            .body("raw");
        assert_eq!(options.method, Some(HttpMethod::Put));
        assert_eq!(options.headers.get("x-test"), Some("1"));
        assert_eq!(options.body.as_deref(), Some("raw"));
    }

    #[test]
    fn options_json_body() {
        let options = RequestOptions::new()
            .json(&serde_json::json!({"name": "x"}))
            .unwrap();
        assert_eq!(options.body.as_deref(), Some(r#"{"name":"x"}"#));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn deserialize_json_body() {
        let body = ParsedBody::Json(serde_json::json!({"name": "x"}));
        let item: Item = body.deserialize().unwrap();
        assert_eq!(item, Item { name: "x".to_string() });
    }

    #[test]
    fn deserialize_mismatch_is_decode_error() {
        let body = ParsedBody::Text("hello".to_string());
        let err = body.deserialize::<Item>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn accessors() {
        let text = ParsedBody::Text("hello".to_string());
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_json().is_none());
        assert!(!text.is_json());
    }
}
