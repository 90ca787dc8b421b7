//! Request module - transport seam between feature code and HTTP backends
//!
//! This module defines the request/response types handed to a `Transport`
//! implementation, plus the authenticated gateway built on top of it. Tests
//! exercise the gateway through a scripted transport; production code uses
//! the reqwest-backed one.

#![allow(async_fn_in_trait)]

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

mod client;
pub use client::*;

mod gateway;
pub use gateway::*;

/// Common trait for HTTP client construction
pub trait HttpClient {
    /// Create a new HTTP client instance
    async fn new() -> Result<Self>
    where
        Self: Sized;
}

/// Executes a fully-resolved request against the backend.
pub trait Transport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

#[derive(Debug, Clone)]
pub enum FormValue {
    Text(String),
    File { file_name: String, data: Vec<u8> },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> FormPart {
        FormPart {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    pub fn file(name: impl Into<String>, file_name: impl Into<String>, data: Vec<u8>) -> FormPart {
        FormPart {
            name: name.into(),
            value: FormValue::File {
                file_name: file_name.into(),
                data,
            },
        }
    }
}

/// A fully-resolved request handed to a transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw backend response before JSON normalization.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Caller-supplied options for a single call: method, body, extra headers.
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub method: Method,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
}

impl CallOptions {
    pub fn new(method: Method) -> CallOptions {
        CallOptions {
            method,
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get() -> CallOptions {
        CallOptions::new(Method::Get)
    }

    pub fn delete() -> CallOptions {
        CallOptions::new(Method::Delete)
    }

    pub fn json<T: Serialize>(method: Method, body: &T) -> Result<CallOptions> {
        Ok(CallOptions {
            method,
            body: RequestBody::Json(serde_json::to_value(body)?),
            headers: Vec::new(),
        })
    }

    pub fn multipart(method: Method, parts: Vec<FormPart>) -> CallOptions {
        CallOptions {
            method,
            body: RequestBody::Multipart(parts),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> CallOptions {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex as StdMutex;

    use super::*;

    /// Scripted transport: a handler closure inspects each request and picks
    /// the response; every request is recorded for assertions.
    pub struct MockTransport {
        handler: Box<dyn Fn(&ApiRequest) -> RawResponse + Send + Sync>,
        requests: StdMutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        pub fn new(
            handler: impl Fn(&ApiRequest) -> RawResponse + Send + Sync + 'static,
        ) -> MockTransport {
            MockTransport {
                handler: Box::new(handler),
                requests: StdMutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self, path_suffix: &str) -> usize {
            self.requests()
                .iter()
                .filter(|request| request.url.ends_with(path_suffix))
                .count()
        }
    }

    impl Transport for MockTransport {
        async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
            let response = (self.handler)(&request);
            self.requests.lock().unwrap().push(request);
            Ok(response)
        }
    }

    pub fn ok(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
        }
    }

    pub fn failure(status: u16, status_text: &str, body: &str) -> RawResponse {
        RawResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }
}
