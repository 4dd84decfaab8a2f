//! Fluent builder describing one not-yet-sent HTTP call.
//!
//! # Design
//! Setters take the request by value and hand it back, so a chain like
//! `post("/api").set_header("foo", ["bar"]).with_json(&payload)` threads a
//! single value through every call without copying. The request holds no
//! network state; a `Client` consumes it on dispatch. The body is a reader
//! that is only drained when the request is sent.

use std::collections::HashMap;
use std::fmt;
use std::io::{Cursor, Read};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use url::form_urlencoded;

use crate::client::{default_client, Client};
use crate::context::Context;
use crate::error::Error;
use crate::response::Response;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header multimap. Keys are case-sensitive here; values keep insertion order.
pub type Headers = HashMap<String, Vec<String>>;

/// Lazily read request payload.
pub type RequestBody = Box<dyn Read + Send>;

/// An HTTP request under construction.
///
/// Not safe to share between threads while it is being built. Dispatching
/// consumes it, so each request is sent at most once.
pub struct Request {
    url: String,
    method: String,
    headers: Headers,
    body: Option<RequestBody>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Request {
    /// Create a request for `url` with `method`. The method is not checked
    /// until dispatch.
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The configured body, if any. Reading from it consumes the payload.
    pub fn body_mut(&mut self) -> Option<&mut (dyn Read + Send + 'static)> {
        self.body.as_deref_mut()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn take_body(&mut self) -> Option<RequestBody> {
        self.body.take()
    }

    /// Replace the body with `reader`.
    pub fn set_body(mut self, reader: impl Read + Send + 'static) -> Self {
        self.body = Some(Box::new(reader));
        self
    }

    pub fn set_content_type(self, value: impl Into<String>) -> Self {
        self.set_header(CONTENT_TYPE_HEADER, [value.into()])
    }

    /// Encode `data` as the JSON body and set `Content-Type: application/json`.
    ///
    /// Serialization errors are swallowed and leave an empty body; use
    /// [`Request::try_with_json`] to surface them.
    pub fn with_json<T: Serialize + ?Sized>(self, data: &T) -> Self {
        let encoded = serde_json::to_vec(data).unwrap_or_default();
        self.set_body(Cursor::new(encoded))
            .set_content_type("application/json")
    }

    /// Like [`Request::with_json`], but fails with `Error::Encode` instead of
    /// sending an empty body.
    pub fn try_with_json<T: Serialize + ?Sized>(self, data: &T) -> Result<Self, Error> {
        let encoded = serde_json::to_vec(data).map_err(Error::Encode)?;
        Ok(self
            .set_body(Cursor::new(encoded))
            .set_content_type("application/json"))
    }

    pub fn with_plain_text(self, text: impl Into<String>) -> Self {
        self.set_body(Cursor::new(text.into().into_bytes()))
            .set_content_type("text/plain")
    }

    /// URL-encode `pairs` as the body. Repeat a key to send several values.
    pub fn with_form<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        self.set_body(Cursor::new(serializer.finish().into_bytes()))
            .set_content_type("application/x-www-form-urlencoded")
    }

    /// Set `Authorization: Bearer {token}`. A leading `Bearer ` in `token`
    /// (any case) is dropped first so it is never doubled.
    pub fn with_bearer(self, token: &str) -> Self {
        let token = match token.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => &token[7..],
            _ => token,
        };
        self.set_header(AUTHORIZATION_HEADER, [format!("Bearer {token}")])
    }

    pub fn with_basic_auth(self, username: &str, password: &str) -> Self {
        let credentials = STANDARD.encode(format!("{username}:{password}"));
        self.set_header(AUTHORIZATION_HEADER, [format!("Basic {credentials}")])
    }

    /// Replace every value of `name` with `values`. An empty `values` removes
    /// the header.
    pub fn set_header<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.headers.remove(&name);
        } else {
            self.headers.insert(name, values);
        }
        self
    }

    pub fn remove_header(self, name: impl Into<String>) -> Self {
        self.set_header(name, std::iter::empty::<String>())
    }

    /// Send through the process-wide default client.
    pub fn send(self, ctx: &Context) -> Result<Response, Error> {
        default_client().execute(ctx, self)
    }

    /// Send through `client`.
    pub fn send_with<C: Client + ?Sized>(self, ctx: &Context, client: &C) -> Result<Response, Error> {
        client.execute(ctx, self)
    }
}
