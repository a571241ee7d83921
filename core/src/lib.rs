//! Async JSON API client.
//!
//! # Overview
//! `ApiClient` wraps an HTTP transport with a base URL, a mutable set of
//! default headers, JSON request encoding and content-type driven response
//! decoding. Convenience verbs (`get`, `post`, `put`, `patch`, `delete`)
//! delegate to a single `request` routine.
//!
//! # Design
//! - Request building and response parsing are pure functions over the
//!   plain-data types in [`http`], so the merge and decode rules are tested
//!   without a network.
//! - I/O goes through the [`Transport`] trait; [`ReqwestTransport`] is the
//!   default.
//! - A call runs exactly once: no retries, no timeout, no cancellation.
//!   Failures are logged through `tracing` and returned to the caller.

pub mod client;
pub mod error;
pub mod helpers;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{is_json_content_type, parse_response, ApiClient};
pub use error::ApiError;
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{ClientConfig, ParsedBody, RequestOptions};
