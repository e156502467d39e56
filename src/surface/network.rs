use super::Surface;
use crate::helpers;
use crate::types::{DataMap, Params, RequestContext, RequestContextBuilder, ResponseHeaders};
use crate::{Mode, Verb};
use http::header::{CONTENT_TYPE, REFERER, USER_AGENT};
use http::request::Parts;
use http::uri::Scheme;
use http::HeaderMap;
use std::net::IpAddr;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// A request received from the network, already decoded by the host server.
///
/// The `get` and `post` data maps are always present in the params context, even when empty.
#[derive(Debug, Clone)]
pub struct NetworkRequest {
    verb: String,
    path: String,
    remote_addr: IpAddr,
    user_agent: String,
    referer: String,
    https: bool,
    query: DataMap,
    body: DataMap,
    headers: ResponseHeaders,
}

impl NetworkRequest {
    pub fn new<V: Into<String>, P: Into<String>>(verb: V, path: P, remote_addr: IpAddr) -> NetworkRequest {
        NetworkRequest {
            verb: verb.into(),
            path: path.into(),
            remote_addr,
            user_agent: String::new(),
            referer: String::new(),
            https: false,
            query: DataMap::new(),
            body: DataMap::new(),
            headers: ResponseHeaders::new(),
        }
    }

    /// Builds a network request from the head of an HTTP request and its collected body.
    ///
    /// The path is percent-decoded, the query string is decoded into the `get` data, and a
    /// form-encoded body is decoded into the `post` data.
    pub fn from_parts(parts: &Parts, remote_addr: IpAddr, body: &[u8]) -> NetworkRequest {
        let raw_path = parts.uri.path();
        let path = helpers::percent_decode_request_path(raw_path).unwrap_or_else(|e| {
            tracing::warn!(path = raw_path, error = %e, "couldn't percent decode request path");
            raw_path.to_owned()
        });

        let query = parts.uri.query().map(helpers::parse_urlencoded).unwrap_or_default();

        let body = if is_form(&parts.headers) {
            helpers::parse_urlencoded(&String::from_utf8_lossy(body))
        } else {
            DataMap::new()
        };

        let https = parts.uri.scheme() == Some(&Scheme::HTTPS)
            || header_str(&parts.headers, FORWARDED_PROTO)
                .map(|v| v.eq_ignore_ascii_case("https"))
                .unwrap_or(false);

        NetworkRequest::new(parts.method.as_str(), path, remote_addr)
            .user_agent(header_str(&parts.headers, USER_AGENT.as_str()).unwrap_or_default())
            .referer(header_str(&parts.headers, REFERER.as_str()).unwrap_or_default())
            .https(https)
            .query(query)
            .body(body)
    }

    pub fn user_agent<S: Into<String>>(mut self, agent: S) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn referer<S: Into<String>>(mut self, referer: S) -> Self {
        self.referer = referer.into();
        self
    }

    pub fn https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn query(mut self, query: DataMap) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: DataMap) -> Self {
        self.body = body;
        self
    }

    /// The header directives emitted by the middleware and handler of the last dispatch.
    pub fn response_headers(&self) -> &ResponseHeaders {
        &self.headers
    }
}

impl Surface for NetworkRequest {
    fn mode(&self) -> Mode {
        Mode::Http
    }

    fn verb(&self) -> &str {
        &self.verb
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn request_context(&self, verb: Verb) -> RequestContext {
        RequestContextBuilder::new(verb, self.path.clone())
            .remote_addr(self.remote_addr)
            .user_agent(self.user_agent.clone())
            .referer(self.referer.clone())
            .https(self.https)
            .headers(self.headers.clone())
            .build()
    }

    fn params(&self, _verb: Verb) -> Params {
        let mut params = Params::new();
        params.insert_data("get", self.query.clone());
        params.insert_data("post", self.body.clone());
        params
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    header_str(headers, CONTENT_TYPE.as_str())
        .map(|v| v.to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
