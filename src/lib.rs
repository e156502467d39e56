//! `routekit` maps a request, made of a verb and a path, to a registered handler, extracts the named path parameters
//! and runs ordered before/after middleware around the handler.
//!
//! The same [`Router`] dispatches requests coming from two invocation surfaces:
//!
//! - 🌐 the network, through a [hyper](https://hyper.rs/) service ([`RouterService`]),
//!
//! - 💻 the command line, as `<path> <verb> [key=value ...]` process arguments ([`CommandLine`]).
//!
//! ## Basic Example
//!
//! ```no_run
//! use routekit::{Config, Middleware, Params, RequestContext, Router};
//! use std::convert::Infallible;
//!
//! // A handler for "/hi/:name".
//! fn hello(_: &RequestContext, params: &Params) -> Result<String, Infallible> {
//!     Ok(format!("Hello, {}\n", params.param("name").unwrap()))
//! }
//!
//! fn router() -> Router<String, Infallible> {
//!     Router::builder()
//!         .middleware(Middleware::before(|ctx| {
//!             println!("{} {} {}", ctx.remote_addr(), ctx.verb(), ctx.path());
//!             Ok(())
//!         }))
//!         .get("/hello", |_, _| Ok("Hello\n".to_owned()))
//!         .get("/hi/:name", hello)
//!         .build()
//!         .unwrap()
//! }
//!
//! #[tokio::main]
//! async fn main() -> routekit::Result<()> {
//!     // `cargo run -- /hi/jim GET` dispatches once from the command line,
//!     // `cargo run` serves the same routes over HTTP.
//!     routekit::run(router(), &Config::from_env()?).await
//! }
//! ```
//!
//! ## Routing
//!
//! ### Verbs
//!
//! A route is registered for one of `DELETE`, `GET`, `HEAD`, `OPTIONS`, `POST` and `PUT`. Verbs given by name are
//! matched case-insensitively; anything else is rejected with [`Error::InvalidVerb`]. [`Router::any`] registers one
//! handler for a set of verbs and validates the whole set before registering anything.
//!
//! A (verb, pattern) pair can only be registered once; a second registration fails with [`Error::DuplicateRoute`].
//!
//! ### Route Paths
//!
//! A pattern matches the whole request path. Literal text matches itself and:
//!
//! ```txt
//! :name     captures one path segment (anything up to the next '/')
//! :name*    captures the rest of the path, '/' included
//! ```
//!
//! ```txt
//! Route path: /users/:userName/books/:bookName
//! Request URL: http://localhost:3000/users/alice/books/HarryPotter
//! params.uri() holds: { "userName": "alice", "bookName": "HarryPotter" }
//! ```
//!
//! The routes of a verb are tried in registration order and the first match wins, even if a later pattern is more
//! specific. When a name appears twice in a pattern, the later capture is kept. Captured values are always text.
//!
//! ### Route Parameters
//!
//! A handler receives the [`RequestContext`] and the [`Params`]. Besides the captured `uri` values, the params hold
//! the surface data: `get` and `post` maps on the network surface (always present, maybe empty), or a single map
//! named after the lower-case verb on the command line, present only if `key=value` arguments were given.
//!
//! ```
//! use routekit::{CommandLine, Invocation, Router};
//! use std::convert::Infallible;
//!
//! let router: Router<String, Infallible> = Router::builder()
//!     .get("/hello", |_, params| {
//!         let get = params.get().unwrap();
//!         Ok(format!("{} {}", get["hello"], get["name"]))
//!     })
//!     .build()
//!     .unwrap();
//!
//! if let Invocation::Dispatch(cmd) = CommandLine::parse("app", ["/hello", "GET", "hello=world", "name=jim"]) {
//!     assert_eq!(router.run(&cmd).unwrap(), "world jim");
//! }
//! ```
//!
//! ## Middleware
//!
//! Middleware only see the request context and can't change the request or the response; they run for every matched
//! route, in the order they were added:
//!
//! - The before middleware run before the route handler.
//! - The after middleware run once the route handler returned successfully.
//!
//! A failing middleware stops the dispatch right there: the handler and the after middleware don't run after a
//! failing before middleware, and a failing after middleware discards what the handler produced.
//!
//! ```
//! use routekit::{Middleware, Router};
//! use std::convert::Infallible;
//!
//! # fn run() -> Router<String, Infallible> {
//! let router = Router::builder()
//!     .middleware(Middleware::before(|ctx| {
//!         println!("{} {}", ctx.verb(), ctx.path());
//!         Ok(())
//!     }))
//!     .middleware(Middleware::after(|ctx| {
//!         ctx.set_header("X-Powered-By: routekit");
//!         Ok(())
//!     }))
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ## Error Handling
//!
//! A dispatch returns the handler's value or a [`RouteError`]. Errors raised by handlers and middleware are boxed as
//! they are and can be downcast back to their own type. The router's own failures are [`Error`] values, the dispatch
//! ones carrying a status code: [`Error::NoRoutesDefined`] (500) when the verb has no routes at all and
//! [`Error::RouteNotFound`] (404) when none of its patterns matched.

pub use self::app::{run, run_cli_args, serve};
pub use self::config::{Config, Mode};
pub use self::error::{Error, RouteError};
pub use self::middleware::{AfterMiddleware, BeforeMiddleware, Middleware};
pub use self::route::Route;
pub use self::router::{Router, RouterBuilder};
pub use self::service::{IntoResponse, RequestService, RequestServiceBuilder, RouterService};
pub use self::surface::{CommandLine, Invocation, NetworkRequest, Surface};
pub use self::types::{DataMap, Params, RequestContext, RequestContextBuilder, ResponseHeaders, RouteParams};
pub use self::verb::Verb;

mod app;
pub mod config;
mod error;
mod helpers;
mod middleware;
mod regex_generator;
mod route;
mod router;
mod service;
pub mod surface;
mod types;
mod verb;

/// A Result type often returned from methods that can have routekit errors.
pub type Result<T> = std::result::Result<T, RouteError>;
