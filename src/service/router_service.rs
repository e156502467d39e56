use crate::router::Router;
use crate::service::request_service::{RequestService, RequestServiceBuilder};
use crate::service::IntoResponse;
use hyper::service::Service;
use std::convert::Infallible;
use std::future::{ready, Ready};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpStream;

/// A hyper [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) over accepted
/// TCP connections. Each connection gets its own [`RequestService`], which knows the peer address
/// and shares the router with every other connection.
///
/// The router is moved in and frozen: no route or middleware can be added once it is served.
/// [`routekit::serve`](crate::serve) runs the usual accept loop around it; use this type directly
/// to drive hyper yourself.
///
/// # Examples
///
/// ```no_run
/// use hyper::service::Service;
/// use hyper_util::rt::{TokioExecutor, TokioIo};
/// use hyper_util::server::conn::auto::Builder;
/// use routekit::{Router, RouterService};
/// use std::convert::Infallible;
/// use std::sync::Arc;
/// use tokio::net::TcpListener;
///
/// # async fn run() -> routekit::Result<()> {
/// let router: Router<&'static str, Infallible> = Router::builder().get("/", |_, _| Ok("Home page")).build()?;
/// let router_service = Arc::new(RouterService::new(router));
/// let listener = TcpListener::bind("127.0.0.1:3001").await?;
///
/// // Serve a single connection.
/// let (stream, _) = listener.accept().await?;
/// let request_service = match router_service.call(&stream).await {
///     Ok(service) => service,
///     Err(never) => match never {},
/// };
/// Builder::new(TokioExecutor::new())
///     .serve_connection(TokioIo::new(stream), request_service)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RouterService<T, E> {
    builder: RequestServiceBuilder<T, E>,
}

impl<T: IntoResponse + 'static, E: Into<crate::RouteError> + 'static> RouterService<T, E> {
    /// Creates a new service with the provided router.
    pub fn new(router: Router<T, E>) -> RouterService<T, E> {
        let builder = RequestServiceBuilder::new(router);
        RouterService { builder }
    }
}

impl<T: IntoResponse + 'static, E: Into<crate::RouteError> + 'static> Service<&TcpStream> for RouterService<T, E> {
    type Response = RequestService<T, E>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, conn: &TcpStream) -> Self::Future {
        let remote_addr = conn.peer_addr().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "couldn't read the peer address");
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        });

        ready(Ok(self.builder.build(remote_addr)))
    }
}
