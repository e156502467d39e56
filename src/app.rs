//! Entry points which pick the invocation surface for a built router.

use crate::service::{IntoResponse, RouterService};
use crate::surface::{CommandLine, Invocation};
use crate::{Config, Mode, Router};
use http_body_util::BodyExt;
use hyper::service::Service;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::future::Future;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Dispatches the process arguments `args` (program name excluded) through `router`.
///
/// Returns `Ok(None)` after printing the usage text when help was requested or the arguments
/// are incomplete.
pub fn run_cli_args<T, E, I, S>(router: &Router<T, E>, program: &str, args: I) -> crate::Result<Option<T>>
where
    T: 'static,
    E: Into<crate::RouteError> + 'static,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match CommandLine::parse(program, args) {
        Invocation::Usage(text) => {
            print!("{}", text);
            Ok(None)
        }
        Invocation::Dispatch(cmd) => router.run_cli(&cmd).map(Some),
    }
}

/// Serves `router` over HTTP on `addr`. Only binding the listener can fail.
pub async fn serve<T, E>(router: Router<T, E>, addr: SocketAddr) -> crate::Result<()>
where
    T: IntoResponse + 'static,
    E: Into<crate::RouteError> + 'static,
{
    let router_service = Arc::new(RouterService::new(router));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "App is running");

    loop {
        let (stream, _) = accept_retrying(|| listener.accept()).await;
        let router_service = router_service.clone();

        tokio::spawn(async move {
            let request_service = match router_service.call(&stream).await {
                Ok(service) => service,
                Err(never) => match never {},
            };

            let io = TokioIo::new(stream);
            let builder = Builder::new(TokioExecutor::new());
            if let Err(err) = builder.serve_connection(io, request_service).await {
                tracing::warn!(error = %err, "Error serving connection");
            }
        });
    }
}

/// Calls `accept` until it yields a connection. Failures, e.g. running out of file descriptors,
/// are logged and retried after a short pause.
async fn accept_retrying<C, F, Fut>(mut accept: F) -> C
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<C>>,
{
    loop {
        match accept().await {
            Ok(conn) => return conn,
            Err(err) => {
                tracing::warn!(error = %err, "failed to accept connection");
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }
}

/// Runs `router` in the mode selected by `config`.
///
/// In command-line mode the handler's output is written to stdout; in network mode this serves
/// requests on `config.addr`.
pub async fn run<T, E>(router: Router<T, E>, config: &Config) -> crate::Result<()>
where
    T: IntoResponse + 'static,
    E: Into<crate::RouteError> + 'static,
{
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());
    let args: Vec<String> = args.collect();

    match config.mode.resolve(!args.is_empty()) {
        Mode::Cli => {
            if let Some(output) = run_cli_args(&router, &program, args)? {
                let body = output.into_response().into_body().collect().await?.to_bytes();
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&body)?;
                stdout.flush()?;
            }
            Ok(())
        }
        Mode::Http | Mode::Auto => serve(router, config.addr).await,
    }
}
