//! Error types for building, dispatching and decoding requests.
//!
//! # Design
//! A failed dispatch always yields exactly one `Error` and never a response.
//! Construction failures (`InvalidMethod`, `InvalidUrl`, `InvalidRequest`,
//! `Body`) and execution failures (`Timeout`, `DeadlineExceeded`,
//! `Cancelled`, `Transport`) share the enum so callers can match on the
//! variant instead of parsing messages.

use std::io;

use thiserror::Error;

/// Errors returned by `Client::execute`, `Response::decode_json` and the
/// fallible builder/config helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// The method string is not a valid HTTP token.
    #[error("invalid method {method:?}: {reason}")]
    InvalidMethod { method: String, reason: String },

    /// The resolved target could not be parsed as an absolute URL.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The transport-level request could not be assembled, usually because of
    /// a malformed header name or value.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ureq::http::Error),

    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    Body(#[source] io::Error),

    /// The client timeout elapsed before the transport finished.
    #[error("request timed out")]
    Timeout,

    /// The context deadline passed before or during the call.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// The context was cancelled before or during the call.
    #[error("context cancelled")]
    Cancelled,

    /// Connection, TLS, DNS or protocol failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body is not well-formed JSON or does not match the
    /// destination type.
    #[error("failed to decode JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// Client configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}
