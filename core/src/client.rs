//! Client abstraction and the default ureq-backed implementation.
//!
//! # Design
//! `Client` is the seam for swapping execution strategies: the standard
//! transport, a mock in tests, or anything else with the same three
//! operations. `StandardClient` keeps its mutable settings (`base_url`,
//! `timeout`) behind an `RwLock` and snapshots them at the start of every
//! `execute`, so reconfiguring a shared client never affects a call that is
//! already in flight.
//!
//! `execute` blocks the caller until the call finishes or the context ends.
//! The context deadline is folded into the per-request timeout. The ureq call
//! itself runs on a short-lived transport thread while the caller waits on
//! whichever comes first, its result or the context's cancellation. A
//! cancelled call returns `Error::Cancelled` straight away; the abandoned
//! transport thread drops its response when it finishes, bounded by the
//! timeout.

use std::fmt;
use std::io::{self, Read};
use std::pin::pin;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use std::thread;
use std::time::Duration;

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::{self, Either};

use ureq::http::{self, Method, Uri};
use ureq::{Agent, AsSendBody};

use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::Error;
use crate::request::Request;
use crate::resolve::resolve;
use crate::response::Response;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Execution strategy that turns a `Request` into a `Response`.
pub trait Client: Send + Sync {
    /// Prefix applied to relative request URLs on subsequent calls.
    fn set_base_url(&self, url: &str);

    /// Transport timeout applied to subsequent calls.
    fn set_timeout(&self, timeout: Duration);

    /// Send `request`. A base URL is prepended unless the request URL is
    /// already absolute. Returns either a response or an error, never both.
    fn execute(&self, ctx: &Context, request: Request) -> Result<Response, Error>;
}

#[derive(Debug, Clone)]
struct Settings {
    base_url: String,
    timeout: Option<Duration>,
}

/// Default `Client` backed by a `ureq::Agent`.
pub struct StandardClient {
    agent: Agent,
    settings: RwLock<Settings>,
}

impl fmt::Debug for StandardClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardClient")
            .field("settings", &self.settings())
            .finish_non_exhaustive()
    }
}

impl Default for StandardClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardClient {
    /// A client with no base URL and the default 30s timeout.
    pub fn new() -> Self {
        Self::from_config(&ClientConfig::default())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            settings: RwLock::new(Settings {
                base_url: config.base_url.clone(),
                timeout: Some(config.timeout),
            }),
        }
    }

    /// Wrap a preconfigured agent. Its own timeouts apply until
    /// `set_timeout` is called.
    pub fn with_agent(agent: Agent) -> Self {
        Self {
            agent,
            settings: RwLock::new(Settings {
                base_url: String::new(),
                timeout: None,
            }),
        }
    }

    pub fn base_url(&self) -> String {
        self.settings().base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.settings().timeout
    }

    fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run the transport call on its own thread and wait for its result or
    /// for `ctx` to be cancelled, whichever comes first. `None` means
    /// cancelled.
    fn run<B>(
        &self,
        ctx: &Context,
        request: http::Request<B>,
        timeout: Option<Duration>,
    ) -> Result<Option<http::Response<ureq::Body>>, ureq::Error>
    where
        B: AsSendBody + Send + 'static,
    {
        let mut config = self
            .agent
            .configure_request(request)
            .http_status_as_error(false);
        if timeout.is_some() {
            config = config.timeout_global(timeout);
        }
        let request = config.build();

        let agent = self.agent.clone();
        let (tx, rx) = oneshot::channel();
        thread::Builder::new()
            .name("httpy-transport".to_string())
            .spawn(move || {
                // The receiver is gone once the caller gave up.
                let _ = tx.send(agent.run(request));
            })
            .map_err(ureq::Error::Io)?;

        block_on(async {
            match future::select(pin!(ctx.cancelled()), rx).await {
                Either::Left(_) => Ok(None),
                Either::Right((Ok(result), _)) => result.map(Some),
                Either::Right((Err(oneshot::Canceled), _)) => Err(ureq::Error::Io(
                    io::Error::other("transport thread exited without a result"),
                )),
            }
        })
    }
}

impl Client for StandardClient {
    fn set_base_url(&self, url: &str) {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .base_url = url.to_string();
    }

    fn set_timeout(&self, timeout: Duration) {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .timeout = Some(timeout);
    }

    fn execute(&self, ctx: &Context, mut request: Request) -> Result<Response, Error> {
        let settings = self.settings();
        let target = resolve(&settings.base_url, request.url());

        let method = Method::from_bytes(request.method().as_bytes()).map_err(|e| {
            Error::InvalidMethod {
                method: request.method().to_string(),
                reason: e.to_string(),
            }
        })?;
        let uri = parse_target(&target)?;

        let mut builder = http::Request::builder().method(method.clone()).uri(uri);
        for (name, values) in request.headers() {
            for value in values {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        let body = read_body(&mut request)?;

        ctx.check()?;
        let (timeout, deadline_bound) = effective_timeout(settings.timeout, ctx.remaining());

        tracing::debug!(method = %method, url = %target, ?timeout, "dispatching request");
        let result = match body {
            Some(bytes) => self.run(ctx, builder.body(bytes)?, timeout),
            None => self.run(ctx, builder.body(())?, timeout),
        };

        let response = result.map_err(|err| match err {
            ureq::Error::Timeout(_) if deadline_bound => Error::DeadlineExceeded,
            ureq::Error::Timeout(_) => Error::Timeout,
            other => Error::Transport(other),
        })?;
        let Some(response) = response else {
            tracing::debug!(url = %target, "request cancelled in flight");
            return Err(Error::Cancelled);
        };

        tracing::debug!(status = response.status().as_u16(), url = %target, "received response");
        Ok(Response::from(response))
    }
}

/// Parse the resolved target, requiring a scheme and a host.
fn parse_target(target: &str) -> Result<Uri, Error> {
    let invalid = |reason: String| Error::InvalidUrl {
        url: target.to_string(),
        reason,
    };
    let uri: Uri = target
        .parse()
        .map_err(|e: http::uri::InvalidUri| invalid(e.to_string()))?;
    if uri.scheme().is_none() || uri.host().is_none() {
        return Err(invalid("missing scheme or host".to_string()));
    }
    Ok(uri)
}

fn read_body(request: &mut Request) -> Result<Option<Vec<u8>>, Error> {
    let Some(mut reader) = request.take_body() else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(Error::Body)?;
    Ok(Some(buf))
}

/// The tighter of the client timeout and the context's remaining time, and
/// whether the context is the binding limit.
fn effective_timeout(
    client: Option<Duration>,
    remaining: Option<Duration>,
) -> (Option<Duration>, bool) {
    match (client, remaining) {
        (Some(timeout), Some(left)) if left < timeout => (Some(left), true),
        (Some(timeout), _) => (Some(timeout), false),
        (None, Some(left)) => (Some(left), true),
        (None, None) => (None, false),
    }
}

static DEFAULT_CLIENT: LazyLock<RwLock<Arc<dyn Client>>> = LazyLock::new(|| {
    let client: Arc<dyn Client> = Arc::new(StandardClient::new());
    RwLock::new(client)
});

/// The process-wide client used by `Request::send`. Created on first use as
/// a `StandardClient` with the default timeout.
pub fn default_client() -> Arc<dyn Client> {
    DEFAULT_CLIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide client, returning the previous one.
pub fn set_default_client(client: Arc<dyn Client>) -> Arc<dyn Client> {
    let mut slot = DEFAULT_CLIENT
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, client)
}

/// A new `StandardClient`. With `None` it builds its own agent with the
/// default timeout; with `Some(agent)` it sends through that agent and leaves
/// the timeout to the agent's configuration until `set_timeout` is called.
pub fn new_client(agent: Option<Agent>) -> StandardClient {
    match agent {
        Some(agent) => StandardClient::with_agent(agent),
        None => StandardClient::new(),
    }
}
