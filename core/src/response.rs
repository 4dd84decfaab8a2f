//! Response returned by a successful dispatch.
//!
//! # Design
//! `Response` is a newtype over the transport's `http::Response<ureq::Body>`
//! and dereferences to it, so status, headers and the body stream are the
//! transport's own values with no copying. The only addition is
//! `decode_json`. The caller owns the body stream from the moment the
//! response is returned.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use ureq::http::{self, StatusCode};
use ureq::Body;

use crate::error::Error;

pub struct Response(http::Response<Body>);

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.0.status())
            .field("headers", self.0.headers())
            .finish_non_exhaustive()
    }
}

impl Response {
    /// Build a response from a status and an in-memory body. Mostly useful
    /// for test doubles.
    pub fn from_bytes(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let mut inner = http::Response::new(Body::builder().data(body));
        *inner.status_mut() = status;
        Self(inner)
    }

    /// Stream the body through a JSON decoder into `T`.
    ///
    /// The decoded bytes are not cached: a second call reads from the
    /// already-consumed stream and fails.
    pub fn decode_json<T: DeserializeOwned>(&mut self) -> Result<T, Error> {
        serde_json::from_reader(self.0.body_mut().as_reader()).map_err(Error::Decode)
    }

    pub fn into_inner(self) -> http::Response<Body> {
        self.0
    }
}

impl From<http::Response<Body>> for Response {
    fn from(inner: http::Response<Body>) -> Self {
        Self(inner)
    }
}

impl Deref for Response {
    type Target = http::Response<Body>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Response {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Greeting {
        message: String,
    }

    #[test]
    fn decode_json_reads_body() {
        let mut resp = Response::from_bytes(StatusCode::OK, r#"{"message":"greetings"}"#);
        let greeting: Greeting = resp.decode_json().unwrap();
        assert_eq!(greeting.message, "greetings");
    }

    #[test]
    fn decode_json_rejects_malformed_body() {
        let mut resp = Response::from_bytes(StatusCode::OK, "not json");
        let err = resp.decode_json::<Greeting>().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn decode_json_rejects_shape_mismatch() {
        let mut resp = Response::from_bytes(StatusCode::OK, r#"{"other":1}"#);
        assert!(matches!(resp.decode_json::<Greeting>(), Err(Error::Decode(_))));
    }

    #[test]
    fn second_decode_fails() {
        let mut resp = Response::from_bytes(StatusCode::OK, r#"{"message":"once"}"#);
        let first: Greeting = resp.decode_json().unwrap();
        assert_eq!(first.message, "once");
        assert!(resp.decode_json::<Greeting>().is_err());
    }

    #[test]
    fn derefs_to_transport_response() {
        let resp = Response::from_bytes(StatusCode::NOT_FOUND, "");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().is_empty());
        assert_eq!(resp.into_inner().status().as_u16(), 404);
    }
}
