//! In-memory `Client` for tests.
//!
//! `MockClient` records every call and answers with outcomes queued through
//! `push_response` / `push_error`, in order. When the queue is empty it
//! answers `200 OK` with an empty body.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use ureq::http::StatusCode;

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::request::Request;
use crate::resolve::resolve;
use crate::response::Response;

/// One `execute` call seen by a `MockClient`.
#[derive(Debug)]
pub struct MockCall {
    /// The request URL after applying the base URL.
    pub target: String,
    pub timeout: Option<Duration>,
    pub request: Request,
}

#[derive(Debug, Default)]
pub struct MockClient {
    base_url: Mutex<String>,
    timeout: Mutex<Option<Duration>>,
    outcomes: Mutex<VecDeque<Result<Response, Error>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: Response) {
        lock(&self.outcomes).push_back(Ok(response));
    }

    pub fn push_error(&self, error: Error) {
        lock(&self.outcomes).push_back(Err(error));
    }

    /// Drain the recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        std::mem::take(&mut *lock(&self.calls))
    }

    pub fn base_url(&self) -> String {
        lock(&self.base_url).clone()
    }

    pub fn timeout(&self) -> Option<Duration> {
        *lock(&self.timeout)
    }
}

impl Client for MockClient {
    fn set_base_url(&self, url: &str) {
        *lock(&self.base_url) = url.to_string();
    }

    fn set_timeout(&self, timeout: Duration) {
        *lock(&self.timeout) = Some(timeout);
    }

    fn execute(&self, ctx: &Context, request: Request) -> Result<Response, Error> {
        ctx.check()?;
        let call = MockCall {
            target: resolve(&self.base_url(), request.url()),
            timeout: self.timeout(),
            request,
        };
        lock(&self.calls).push(call);
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| Ok(Response::from_bytes(StatusCode::OK, Vec::new())))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::{get, post};

    #[test]
    fn records_resolved_target_and_settings() {
        let client = MockClient::new();
        client.set_base_url("http://server/api/");
        client.set_timeout(Duration::from_secs(3));

        let ctx = Context::background();
        client.execute(&ctx, post("/values").with_plain_text("hi")).unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target, "http://server/api/values");
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(3)));
        assert_eq!(calls[0].request.method(), "POST");
        assert!(client.calls().is_empty());
    }

    #[test]
    fn replays_outcomes_in_order_then_defaults_to_ok() {
        let client = MockClient::new();
        client.push_response(Response::from_bytes(StatusCode::CREATED, "{}"));
        client.push_error(Error::Timeout);

        let ctx = Context::background();
        let first = client.execute(&ctx, get("http://a")).unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        assert!(matches!(client.execute(&ctx, get("http://a")), Err(Error::Timeout)));
        let last = client.execute(&ctx, get("http://a")).unwrap();
        assert_eq!(last.status(), StatusCode::OK);
    }

    #[test]
    fn honours_cancelled_context() {
        let client = MockClient::new();
        let ctx = Context::background();
        ctx.cancel();
        assert!(matches!(client.execute(&ctx, get("http://a")), Err(Error::Cancelled)));
        assert!(client.calls().is_empty());
    }
}
