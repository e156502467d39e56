use crate::router::Router;
use crate::service::{apply_header_directives, error_response, IntoResponse};
use crate::surface::NetworkRequest;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{service::Service, Request, Response};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

pub struct RequestService<T, E> {
    pub(crate) router: Arc<Router<T, E>>,
    pub(crate) remote_addr: SocketAddr,
}

impl<T, E, B> Service<Request<B>> for RequestService<T, E>
where
    T: IntoResponse + 'static,
    E: Into<crate::RouteError> + 'static,
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<crate::RouteError>,
{
    type Response = Response<Full<Bytes>>;
    type Error = crate::RouteError;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let router = self.router.clone();
        let remote_addr = self.remote_addr;

        let fut = async move {
            let (parts, body) = req.into_parts();
            let body = body
                .collect()
                .await
                .map_err(Into::<crate::RouteError>::into)?
                .to_bytes();

            let net = NetworkRequest::from_parts(&parts, remote_addr.ip(), &body);

            let mut res = match router.run_http(&net) {
                Ok(output) => output.into_response(),
                Err(err) => {
                    tracing::debug!(method = %parts.method, path = parts.uri.path(), error = %err, "dispatch failed");
                    error_response(&err)
                }
            };

            apply_header_directives(&mut res, net.response_headers().take());
            Ok(res)
        };

        Box::pin(fut)
    }
}

#[derive(Debug)]
pub struct RequestServiceBuilder<T, E> {
    router: Arc<Router<T, E>>,
}

impl<T: 'static, E: Into<crate::RouteError> + 'static> RequestServiceBuilder<T, E> {
    pub fn new(router: Router<T, E>) -> Self {
        Self {
            router: Arc::from(router),
        }
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService<T, E> {
        RequestService {
            router: self.router.clone(),
            remote_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, RequestServiceBuilder, Router};
    use http::{Method, StatusCode};
    use http_body_util::{BodyExt, Full};
    use hyper::service::Service;
    use hyper::{body::Bytes, Request, Response};
    use std::net::SocketAddr;
    use std::str::FromStr;

    async fn body_text(resp: Response<Full<Bytes>>) -> String {
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body_bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_route_request() {
        const RESPONSE_TEXT: &str = "Hello world!";
        let remote_addr = SocketAddr::from_str("10.1.2.3:8080").unwrap();
        let router: Router<String, Error> = Router::builder()
            .get("/", |ctx, _| Ok(format!("{} from {}", RESPONSE_TEXT, ctx.remote_addr())))
            .build()
            .unwrap();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let builder = RequestServiceBuilder::new(router);
        let service = builder.build(remote_addr);

        let resp = service.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "Hello world! from 10.1.2.3");
    }

    #[tokio::test]
    async fn should_decode_form_body_and_apply_headers() {
        let router: Router<String, Error> = Router::builder()
            .post("/test", |ctx, params| {
                ctx.set_header("X-Name: routekit");
                Ok(params.post().and_then(|p| p.get("name")).cloned().unwrap_or_default())
            })
            .build()
            .unwrap();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/test?ignored=1")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Full::new(Bytes::from("name=jim+bob")))
            .unwrap();

        let service = RequestServiceBuilder::new(router).build(SocketAddr::from(([127, 0, 0, 1], 1)));
        let resp = service.call(req).await.unwrap();
        assert_eq!(resp.headers().get("x-name").unwrap(), "routekit");
        assert_eq!(body_text(resp).await, "jim bob");
    }

    #[tokio::test]
    async fn should_map_router_errors_to_status() {
        let router: Router<String, Error> = Router::builder().get("/", |_, _| Ok(String::new())).build().unwrap();
        let service = RequestServiceBuilder::new(router).build(SocketAddr::from(([127, 0, 0, 1], 1)));

        let req = Request::builder().uri("/missing").body(Full::new(Bytes::new())).unwrap();
        let resp = service.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(resp).await, "No route found for: GET, /missing");

        let req = Request::builder()
            .method(Method::PUT)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = service.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
