//! Request shim: intercepts same-context outgoing requests and suppresses
//! those targeting known ad endpoints.
//!
//! Purely preventive: no identity tracking, no counting. The shim owns the
//! original transport for the page context's lifetime; dropping the shim
//! drops the interception with it, so nothing leaks across page reloads.

use crate::services::selector_catalog::is_ad_request_url;
use crate::types::errors::RequestError;

/// Successful reply from the underlying transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

/// The page's original outgoing-request entry point.
pub trait RequestTransport {
    fn dispatch(&mut self, method: &str, url: &str) -> Result<TransportReply, RequestError>;
}

/// Installed interceptor wrapping the original transport.
pub struct RequestShim<T: RequestTransport> {
    inner: T,
}

impl<T: RequestTransport> RequestShim<T> {
    pub fn install(inner: T) -> Self {
        Self { inner }
    }

    /// Promise-style entry point. A matching target rejects with a
    /// descriptive error; anything else passes through to the original
    /// transport with arguments unchanged.
    pub fn fetch(&mut self, url: &str) -> Result<TransportReply, RequestError> {
        if is_ad_request_url(url) {
            return Err(RequestError::Blocked(url.to_string()));
        }
        self.inner.dispatch("GET", url)
    }

    pub(crate) fn dispatch(
        &mut self,
        method: &str,
        url: &str,
    ) -> Result<TransportReply, RequestError> {
        self.inner.dispatch(method, url)
    }

    /// Uninstalls the shim, returning the original transport.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// Imperative request object. A matching `open` target silently leaves the
/// request unarmed: `send` then returns `Ok(None)` without ever dispatching.
#[derive(Debug, Default)]
pub struct OutboundRequest {
    method: String,
    target: Option<String>,
}

impl OutboundRequest {
    pub fn new() -> Self {
        Self {
            method: String::new(),
            target: None,
        }
    }

    /// Arms the request. Matching ad targets are dropped without error; the
    /// caller observes a normal return.
    pub fn open(&mut self, method: &str, url: &str) {
        if is_ad_request_url(url) {
            self.target = None;
            return;
        }
        self.method = method.to_string();
        self.target = Some(url.to_string());
    }

    pub fn is_armed(&self) -> bool {
        self.target.is_some()
    }

    /// Dispatches through the shim if armed. Unarmed sends complete
    /// successfully but carry no reply.
    pub fn send<T: RequestTransport>(
        &self,
        shim: &mut RequestShim<T>,
    ) -> Result<Option<TransportReply>, RequestError> {
        match &self.target {
            Some(url) => shim.dispatch(&self.method, url).map(Some),
            None => Ok(None),
        }
    }
}
