//! HTTP transport abstraction.
//!
//! # Data Flow
//! ```text
//! cas / api components
//!     → HttpRequest (method, url, form or JSON body, headers)
//!     → dyn Transport::send
//!         → retrying.rs: reqwest client with timeout, cookie jar,
//!           connection-level retries
//!     ← HttpResponse (status, headers, text body), never an error for non-2xx
//! ```
//!
//! Higher layers depend on the [`Transport`] trait only, so tests can swap in
//! scripted transports.

pub mod retrying;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, LOCATION};
use reqwest::Method;

use crate::error::Result;

pub use retrying::{RetryingTransport, TransportConfig};

/// Body of an outbound request.
#[derive(Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// Pre-serialized JSON text.
    Json(String),
}

// Form values may hold credentials; only field names are printed.
impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Form(fields) => f
                .debug_tuple("Form")
                .field(&fields.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>())
                .finish(),
            RequestBody::Json(json) => f.debug_tuple("Json").field(&json.len()).finish(),
        }
    }
}

/// An outbound HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
    pub headers: HeaderMap,
}

impl HttpRequest {
    fn new(method: Method, url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            url: url.into(),
            body,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url, RequestBody::Empty)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url, RequestBody::Empty)
    }

    pub fn post_form<K, V>(url: impl Into<String>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(Method::POST, url, RequestBody::Form(fields))
    }

    pub fn post_json(url: impl Into<String>, json: String) -> Self {
        let mut request = Self::new(Method::POST, url, RequestBody::Json(json));
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        request
    }

    /// Add a header, replacing any previous value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Form field value, if this is a form request containing `name`.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        match &self.body {
            RequestBody::Form(fields) => fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Builder-style header insertion; invalid header values are skipped.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `Location` header as text, if present and valid UTF-8.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }
}

/// Minimal HTTP surface every higher component depends on.
///
/// Implementations apply their own timeout and retry policy. A response with
/// any status is `Ok`; only failures to obtain a response are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// The part of a `Location` value after its final `/`.
pub fn trailing_segment(location: &str) -> &str {
    match location.rfind('/') {
        Some(idx) => &location[idx + 1..],
        None => location,
    }
}

/// Join a base URL and a path without doubling or dropping the separator.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
