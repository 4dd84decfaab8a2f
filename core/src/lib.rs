//! Fluent HTTP request builder with a pluggable client.
//!
//! # Overview
//! Build a `Request` with chained setters, then send it through any `Client`:
//!
//! ```no_run
//! use httpy::{post, Client, Context, StandardClient};
//!
//! # fn main() -> Result<(), httpy::Error> {
//! let client = StandardClient::new();
//! client.set_base_url("http://localhost:3000");
//!
//! let mut resp = post("/api")
//!     .with_bearer("token")
//!     .with_json(&serde_json::json!({"message": "hello world"}))
//!     .send_with(&Context::background(), &client)?;
//! let body: serde_json::Value = resp.decode_json()?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `Request` is a by-value builder; dispatch consumes it.
//! - `Client` is the substitution point: `StandardClient` talks to the network
//!   through ureq, `MockClient` (feature `mock`) answers from memory.
//! - Relative request URLs are joined onto the client's base URL by
//!   [`resolve`]; absolute ones are sent as-is.
//! - `Request::send` uses a process-wide default client, replaceable with
//!   [`set_default_client`].

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod methods;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod request;
pub mod resolve;
pub mod response;

pub use client::{default_client, new_client, set_default_client, Client, StandardClient, DEFAULT_TIMEOUT};
pub use config::ClientConfig;
pub use context::Context;
pub use error::Error;
pub use methods::{delete, get, patch, post, put};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockClient};
pub use request::{Headers, Request, RequestBody, AUTHORIZATION_HEADER, CONTENT_TYPE_HEADER};
pub use resolve::resolve;
pub use response::Response;

pub use ureq::http::StatusCode;
