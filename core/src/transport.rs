//! The network seam between `ApiClient` and an HTTP implementation.
//!
//! # Design
//! A transport executes one `HttpRequest` exactly once and reports what came
//! back. It never turns a status code into an error: a 404 is a successful round
//! trip here and becomes `ApiError::Http` in `parse_response`. Only failures
//! to complete the exchange map to `ApiError::Network`.
//!
//! The body of a non-2xx response is never read; such responses come back
//! with an empty `body`.

use std::future::Future;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP round trips for an `ApiClient`.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// Default transport backed by an async `reqwest::Client`.
///
/// No timeout is configured; a request runs until the server answers or the
/// connection fails.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured client (proxies, TLS roots, connection pool).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let mut out = HttpResponse {
            status,
            headers,
            body: String::new(),
        };
        if out.is_success() {
            out.body = response.text().await?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_map_one_to_one() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            assert_eq!(to_reqwest_method(method).as_str(), method.as_str());
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let transport = ReqwestTransport::new();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/"),
            headers: Default::default(),
            body: None,
        };
        let err = transport.send(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn malformed_url_is_network_error() {
        let transport = ReqwestTransport::new();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "not a url".to_string(),
            headers: Default::default(),
            body: None,
        };
        let err = transport.send(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    /// Serves one connection: reads the request, writes `reply`, hangs up.
    async fn one_shot_server(reply: &'static [u8]) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(reply).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/")
    }

    fn get(url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Default::default(),
            body: None,
        }
    }

    #[tokio::test]
    async fn error_status_body_is_not_read() {
        let url = one_shot_server(
            b"HTTP/1.1 500 Internal Server Error\r\ncontent-type: text/plain\r\ncontent-length: 1000\r\n\r\npartial",
        )
        .await;
        let response = ReqwestTransport::new().send(get(url)).await.unwrap();
        assert_eq!(response.status, 500);
        assert!(response.body.is_empty());
        assert_eq!(response.content_type(), Some("text/plain"));
    }

    #[tokio::test]
    async fn truncated_success_body_is_network_error() {
        let url = one_shot_server(b"HTTP/1.1 200 OK\r\ncontent-length: 1000\r\n\r\npartial").await;
        let err = ReqwestTransport::new().send(get(url)).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn success_body_is_read() {
        let url = one_shot_server(b"HTTP/1.1 200 OK\r\ncontent-length: 5\r\n\r\nhello").await;
        let response = ReqwestTransport::new().send(get(url)).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "hello");
    }
}
