//! Collaborator HTTP client contract and JSON:API request helpers
//!
//! The library does not ship an HTTP client. Test suites implement
//! [`ApiClient`] over whatever drives their application (an in-process
//! router, a real HTTP client) and wrap it in [`JsonApiClient`] to send
//! JSON:API bodies with the right content type.

use crate::document::Document;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Header name used for the JSON:API content type
pub const CONTENT_TYPE_HEADER: &str = "CONTENT_TYPE";
/// JSON:API media type
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response returned by a collaborator client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new<B: Into<String>>(status: u16, body: B) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as a JSON:API document
    pub fn document(&self) -> Result<Document> {
        Document::from_body(&self.body)
    }
}

/// Something that can issue HTTP requests for a test
pub trait ApiClient {
    fn request(
        &mut self,
        method: Method,
        url: &str,
        body: Option<String>,
        headers: &[(String, String)],
    ) -> anyhow::Result<Response>;
}

impl<C: ApiClient + ?Sized> ApiClient for &mut C {
    fn request(
        &mut self,
        method: Method,
        url: &str,
        body: Option<String>,
        headers: &[(String, String)],
    ) -> anyhow::Result<Response> {
        (**self).request(method, url, body, headers)
    }
}

/// Headers sent with every JSON:API write
pub fn jsonapi_headers() -> Vec<(String, String)> {
    vec![(CONTENT_TYPE_HEADER.to_string(), JSONAPI_MEDIA_TYPE.to_string())]
}

/// Turn nested test input into a JSON:API request document
pub fn jsonapi_payload(input: &Value) -> Result<Value> {
    Ok(jsonapi_assert_core::sanitize(input)?)
}

/// Wraps an [`ApiClient`] with JSON:API verbs
#[derive(Debug)]
pub struct JsonApiClient<C> {
    inner: C,
}

impl<C: ApiClient> JsonApiClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn get(&mut self, url: &str) -> Result<Response> {
        self.send(Method::Get, url, None, &[])
    }

    /// POST `payload` serialized as JSON
    pub fn post<T: Serialize + ?Sized>(&mut self, url: &str, payload: &T) -> Result<Response> {
        let body = serde_json::to_string(payload)?;
        self.send(Method::Post, url, Some(body), &jsonapi_headers())
    }

    pub fn put<T: Serialize + ?Sized>(&mut self, url: &str, payload: &T) -> Result<Response> {
        let body = serde_json::to_string(payload)?;
        self.send(Method::Put, url, Some(body), &jsonapi_headers())
    }

    pub fn patch<T: Serialize + ?Sized>(&mut self, url: &str, payload: &T) -> Result<Response> {
        let body = serde_json::to_string(payload)?;
        self.send(Method::Patch, url, Some(body), &jsonapi_headers())
    }

    pub fn delete(&mut self, url: &str) -> Result<Response> {
        self.send(Method::Delete, url, None, &jsonapi_headers())
    }

    fn send(
        &mut self,
        method: Method,
        url: &str,
        body: Option<String>,
        headers: &[(String, String)],
    ) -> Result<Response> {
        log::debug!("{} {}", method, url);
        let response = self
            .inner
            .request(method, url, body, headers)
            .map_err(|source| Error::Client {
                method,
                url: url.to_string(),
                source,
            })?;
        log::debug!("{} {} -> {}", method, url, response.status);
        Ok(response)
    }
}
