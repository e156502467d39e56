use crate::Verb;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex, PoisonError};

/// The origin address reported by the command-line surface.
pub const CLI_REMOTE_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// The client agent and referrer reported by the command-line surface.
pub const CLI_MARKER: &str = "cli";

/// Header directives emitted while a request is being dispatched.
///
/// The list is shared with the invocation surface that created the request context, which decides
/// what to do with them after the dispatch. The router never inspects their content.
#[derive(Debug, Clone, Default)]
pub struct ResponseHeaders(Arc<Mutex<Vec<String>>>);

impl ResponseHeaders {
    pub fn new() -> ResponseHeaders {
        ResponseHeaders::default()
    }

    pub(crate) fn push(&self, directive: String) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(directive);
    }

    /// Returns a copy of every directive emitted so far, in emission order.
    pub fn directives(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes and returns every directive emitted so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// A snapshot of the incoming request, built once per dispatch and passed to the middleware and
/// the route handler.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub(crate) verb: Verb,
    pub(crate) path: String,
    pub(crate) remote_addr: IpAddr,
    pub(crate) user_agent: String,
    pub(crate) referer: String,
    pub(crate) https: bool,
    pub(crate) headers: ResponseHeaders,
}

impl RequestContext {
    /// The normalized request verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The request path as it was matched.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The origin address of the request.
    pub fn remote_addr(&self) -> IpAddr {
        self.remote_addr
    }

    /// The client agent string, empty if the client didn't send one.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The referrer string, empty if the client didn't send one.
    pub fn referer(&self) -> &str {
        &self.referer
    }

    /// Whether the request arrived over a secure transport.
    pub fn is_https(&self) -> bool {
        self.https
    }

    /// Emits a response header directive, e.g. `"Content-Type: text/plain"`.
    pub fn set_header<H: Into<String>>(&self, directive: H) {
        self.headers.push(directive.into());
    }

    /// Emits several response header directives, in order.
    pub fn set_headers<I, H>(&self, directives: I)
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        for directive in directives {
            self.set_header(directive);
        }
    }

    /// The header directives emitted so far.
    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }
}

/// Builder for [`RequestContext`], used by the invocation surfaces.
#[derive(Debug, Clone)]
pub struct RequestContextBuilder {
    inner: RequestContext,
}

impl RequestContextBuilder {
    pub fn new<P: Into<String>>(verb: Verb, path: P) -> RequestContextBuilder {
        RequestContextBuilder {
            inner: RequestContext {
                verb,
                path: path.into(),
                remote_addr: CLI_REMOTE_ADDR,
                user_agent: String::new(),
                referer: String::new(),
                https: false,
                headers: ResponseHeaders::new(),
            },
        }
    }

    pub fn remote_addr(mut self, addr: IpAddr) -> Self {
        self.inner.remote_addr = addr;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, agent: S) -> Self {
        self.inner.user_agent = agent.into();
        self
    }

    pub fn referer<S: Into<String>>(mut self, referer: S) -> Self {
        self.inner.referer = referer.into();
        self
    }

    pub fn https(mut self, https: bool) -> Self {
        self.inner.https = https;
        self
    }

    pub fn headers(mut self, headers: ResponseHeaders) -> Self {
        self.inner.headers = headers;
        self
    }

    pub fn build(self) -> RequestContext {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_share_header_directives_with_the_surface() {
        let headers = ResponseHeaders::new();
        let ctx = RequestContextBuilder::new(Verb::Get, "/")
            .headers(headers.clone())
            .build();

        ctx.set_header("X-One: 1");
        ctx.set_headers(vec!["X-Two: 2", "X-Three: 3"]);

        assert_eq!(headers.directives(), vec!["X-One: 1", "X-Two: 2", "X-Three: 3"]);
        assert_eq!(headers.take().len(), 3);
        assert!(ctx.headers().directives().is_empty());
    }

    #[test]
    fn should_default_to_loopback() {
        let ctx = RequestContextBuilder::new(Verb::Post, "/x").build();
        assert_eq!(ctx.remote_addr(), CLI_REMOTE_ADDR);
        assert!(!ctx.is_https());
        assert_eq!(ctx.verb(), Verb::Post);
        assert_eq!(ctx.path(), "/x");
    }
}
