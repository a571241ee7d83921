//! Async JSON API client with mutable default headers.
//!
//! # Design
//! `ApiClient` owns a `ClientConfig` (base URL plus default headers) and a
//! `Transport`. Every call goes through `request`, which splits into three
//! steps: `build_request` (pure: URL concatenation and header merge), the
//! transport round trip, and `parse_response` (pure: status check and body
//! decode). Headers are mutated only through `&mut self`, so the borrow
//! checker rules out changing them while a request borrows the client.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{ClientConfig, ParsedBody, RequestOptions};

const AUTHORIZATION: &str = "Authorization";

/// HTTP client for a JSON API rooted at `base_url`.
///
/// Construct one explicitly and pass it to the code that needs it; there is
/// no shared global instance.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, ReqwestTransport::new())
    }
}

impl Default for ApiClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self::from_config(ClientConfig::new(base_url), transport)
    }

    pub fn from_config(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn default_headers(&self) -> &Headers {
        &self.config.default_headers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the outgoing request without sending it.
    ///
    /// The URL is `base_url` followed by `endpoint` with no slash
    /// normalization. Headers from `options` replace same-named defaults.
    pub fn build_request(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        HttpRequest {
            method: options.method.unwrap_or_default(),
            url: format!("{}{}", self.config.base_url, endpoint),
            headers: self.config.default_headers.merged(&options.headers),
            body: options.body,
        }
    }

    /// Sends one request and decodes the response.
    ///
    /// Every error is logged before it is returned.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<ParsedBody, ApiError> {
        let request = self.build_request(endpoint, options);
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let result = match self.transport.send(request).await {
            Ok(response) => parse_response(response),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            tracing::error!(%method, %url, error = %err, "API error");
        }
        result
    }

    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<ParsedBody, ApiError> {
        self.request(endpoint, options.method(HttpMethod::Get)).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &B,
        options: RequestOptions,
    ) -> Result<ParsedBody, ApiError> {
        self.send_json(HttpMethod::Post, endpoint, data, options).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &B,
        options: RequestOptions,
    ) -> Result<ParsedBody, ApiError> {
        self.send_json(HttpMethod::Put, endpoint, data, options).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &B,
        options: RequestOptions,
    ) -> Result<ParsedBody, ApiError> {
        self.send_json(HttpMethod::Patch, endpoint, data, options).await
    }

    pub async fn delete(&self, endpoint: &str, options: RequestOptions) -> Result<ParsedBody, ApiError> {
        self.request(endpoint, options.method(HttpMethod::Delete)).await
    }

    pub fn set_header(&mut self, key: &str, value: &str) {
        self.config.default_headers.set(key, value);
    }

    pub fn remove_header(&mut self, key: &str) {
        self.config.default_headers.remove(key);
    }

    /// Sends `Authorization: Bearer <token>` on subsequent requests.
    pub fn set_auth_token(&mut self, token: &str) {
        self.set_header(AUTHORIZATION, &format!("Bearer {token}"));
    }

    pub fn remove_auth_token(&mut self) {
        self.remove_header(AUTHORIZATION);
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        data: &B,
        options: RequestOptions,
    ) -> Result<ParsedBody, ApiError> {
        let options = options.method(method).json(data).inspect_err(|err| {
            tracing::error!(%method, endpoint, error = %err, "API error");
        })?;
        self.request(endpoint, options).await
    }
}

/// True when a `content-type` value names JSON. A missing header is not JSON.
pub fn is_json_content_type(header: Option<&str>) -> bool {
    header.is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
}

/// Map a response to a decoded body, or to `ApiError::Http` for non-2xx
/// statuses without looking at the body.
pub fn parse_response(response: HttpResponse) -> Result<ParsedBody, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
        });
    }
    if is_json_content_type(response.content_type()) {
        return serde_json::from_str(&response.body)
            .map(ParsedBody::Json)
            .map_err(|e| ApiError::Decode(e.to_string()));
    }
    Ok(ParsedBody::Text(response.body))
}
