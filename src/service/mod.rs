//! Serves a [`Router`](crate::Router) with hyper.

use crate::Error;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

pub use self::request_service::{RequestService, RequestServiceBuilder};
pub use self::router_service::RouterService;

mod request_service;
mod router_service;

/// Converts a handler's output into an HTTP response.
pub trait IntoResponse {
    fn into_response(self) -> Response<Full<Bytes>>;
}

impl IntoResponse for Response<Full<Bytes>> {
    fn into_response(self) -> Response<Full<Bytes>> {
        self
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response<Full<Bytes>> {
        text_response(StatusCode::OK, Bytes::from(self))
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response<Full<Bytes>> {
        text_response(StatusCode::OK, Bytes::from_static(self.as_bytes()))
    }
}

impl IntoResponse for Bytes {
    fn into_response(self) -> Response<Full<Bytes>> {
        Response::new(Full::new(self))
    }
}

impl IntoResponse for () {
    fn into_response(self) -> Response<Full<Bytes>> {
        Response::new(Full::new(Bytes::new()))
    }
}

impl<T: IntoResponse> IntoResponse for (StatusCode, T) {
    fn into_response(self) -> Response<Full<Bytes>> {
        let mut res = self.1.into_response();
        *res.status_mut() = self.0;
        res
    }
}

fn text_response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(body));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    res
}

/// Builds the response for a failed dispatch. Router errors keep their status, anything raised by
/// a handler or a middleware is an internal server error.
pub(crate) fn error_response(err: &crate::RouteError) -> Response<Full<Bytes>> {
    let status = Error::find(err)
        .and_then(Error::status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    text_response(status, Bytes::from(err.to_string()))
}

/// Applies header directives, in order, to a response.
///
/// `Name: value` sets a header, replacing any previous value. `HTTP/x.y <code> ...` sets the
/// status. Anything else is logged and skipped.
pub(crate) fn apply_header_directives(res: &mut Response<Full<Bytes>>, directives: Vec<String>) {
    for directive in directives {
        if directive.starts_with("HTTP/") {
            match directive
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse::<u16>().ok())
                .and_then(|code| StatusCode::from_u16(code).ok())
            {
                Some(status) => *res.status_mut() = status,
                None => tracing::warn!(directive = %directive, "skipping malformed status directive"),
            }
            continue;
        }

        let parsed = directive.split_once(':').and_then(|(name, value)| {
            let name = HeaderName::from_bytes(name.trim().as_bytes()).ok()?;
            let value = HeaderValue::from_str(value.trim()).ok()?;
            Some((name, value))
        });

        match parsed {
            Some((name, value)) => {
                res.headers_mut().insert(name, value);
            }
            None => tracing::warn!(directive = %directive, "skipping malformed header directive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_apply_header_and_status_directives() {
        let mut res = "hi".into_response();
        apply_header_directives(
            &mut res,
            vec![
                "Content-Type: application/json".to_owned(),
                "X-Custom:  spaced  ".to_owned(),
                "HTTP/1.1 201 Created".to_owned(),
                "not a header".to_owned(),
                "Bad Name: x".to_owned(),
            ],
        );

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(res.headers().get("x-custom").unwrap(), "spaced");
        assert_eq!(res.headers().len(), 2);
    }

    #[test]
    fn should_map_errors_to_status() {
        let not_found: crate::RouteError = Box::new(Error::RouteNotFound {
            verb: "GET".into(),
            path: "/x".into(),
        });
        assert_eq!(error_response(&not_found).status(), StatusCode::NOT_FOUND);

        let handler_err: crate::RouteError = "boom".into();
        assert_eq!(error_response(&handler_err).status(), StatusCode::INTERNAL_SERVER_ERROR);

        let misuse: crate::RouteError = Box::new(Error::SurfaceMisuse("wrong".into()));
        assert_eq!(error_response(&misuse).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn should_convert_handler_outputs() {
        let res = (StatusCode::ACCEPTED, "queued".to_owned()).into_response();
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert!(res.headers().get(CONTENT_TYPE).is_some());

        assert_eq!(().into_response().status(), StatusCode::OK);
    }
}
