use crate::middleware::{AfterMiddleware, BeforeMiddleware, Middleware};
use crate::route::{Handler, Route};
use crate::surface::Surface;
use crate::types::{Params, RequestContext, RouteParams};
use crate::{Error, Mode, Verb};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

pub use self::builder::RouterBuilder;

mod builder;

/// Represents a router instance which holds the routes and the middlewares.
///
/// Routes are kept per verb in registration order, and a request is dispatched to the first route
/// of its verb whose pattern matches the whole path. There is no "most specific wins" rule: when
/// two patterns can match the same path, the one registered first always handles it.
///
/// This `Router<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the value produced by the route handlers and returned from a dispatch.
/// * The `E` represents any error type which will be used by route handlers and the middlewares. This error type must be
///   convertible into a boxed [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// A router is built first and served afterwards: registration needs `&mut self` while a dispatch
/// only needs `&self`, so a router shared behind an `Arc` can't change while it serves requests.
///
/// # Examples
///
/// ```
/// use routekit::{CommandLine, Invocation, Params, RequestContext, Router};
/// use std::convert::Infallible;
///
/// fn hello(_: &RequestContext, params: &Params) -> Result<String, Infallible> {
///     Ok(format!("Hello, {}", params.param("name").unwrap()))
/// }
///
/// let mut router: Router<String, Infallible> = Router::new();
/// router.get("/hi/:name", hello).unwrap();
///
/// if let Invocation::Dispatch(cmd) = CommandLine::parse("app", ["/hi/jim", "GET"]) {
///     assert_eq!(router.run(&cmd).unwrap(), "Hello, jim");
/// }
/// ```
pub struct Router<T, E> {
    routes: [Vec<Route<T, E>>; 6],
    before: Vec<BeforeMiddleware<E>>,
    after: Vec<AfterMiddleware<E>>,
}

impl<T, E> Default for Router<T, E> {
    fn default() -> Self {
        Router {
            routes: Default::default(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

impl<T: 'static, E: Into<crate::RouteError> + 'static> Router<T, E> {
    /// Creates an empty router.
    pub fn new() -> Router<T, E> {
        Router::default()
    }

    /// Return a [RouterBuilder](./struct.RouterBuilder.html) instance to build a `Router`.
    pub fn builder() -> RouterBuilder<T, E> {
        RouterBuilder::new()
    }

    /// Registers a handler for `pattern` on a single verb given by name, e.g. `"get"`.
    ///
    /// Fails with [`Error::InvalidVerb`] for an unsupported verb and with [`Error::DuplicateRoute`]
    /// if the pair is already registered.
    pub fn add<V, P, H>(&mut self, verb: V, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        V: AsRef<str>,
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        let verb = verb.as_ref().parse::<Verb>().map_err(|e| {
            tracing::warn!(error = %e, "rejected route registration");
            e
        })?;
        self.add_route(verb, pattern.into(), Arc::new(handler))?;
        Ok(self)
    }

    /// Registers the same handler for `pattern` on every verb in `verbs`.
    ///
    /// Every verb is validated, and checked for an existing registration, before anything is
    /// inserted: a rejected set leaves the router untouched. [`Error::InvalidVerb`] names every
    /// invalid entry of the set, and an empty set is rejected the same way. A verb listed more than
    /// once is registered once.
    pub fn any<I, S, P, H>(&mut self, verbs: I, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        let pattern = pattern.into();
        let mut verbs = Verb::parse_all(verbs).map_err(|e| {
            tracing::warn!(error = %e, pattern = %pattern, "rejected route registration");
            e
        })?;
        verbs.sort();
        verbs.dedup();

        if let Some(verb) = verbs.iter().find(|v| self.exists_for(**v, &pattern)) {
            return Err(Error::DuplicateRoute {
                verb: verb.to_string(),
                pattern,
            }
            .into());
        }

        // Compile once up front so an invalid pattern can't leave a partial registration behind.
        let handler: Handler<T, E> = Arc::new(handler);
        let compiled = verbs
            .iter()
            .map(|verb| Route::new_with_shared_handler(pattern.clone(), *verb, handler.clone()))
            .collect::<crate::Result<Vec<_>>>()?;

        for route in compiled {
            tracing::debug!(verb = %route.verb, pattern = %route.pattern, "registered route");
            self.routes[route.verb.index()].push(route);
        }

        Ok(self)
    }

    /// Adds a new route with `GET` method and the handler at the specified path.
    pub fn get<P, H>(&mut self, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.add_route(Verb::Get, pattern.into(), Arc::new(handler))?;
        Ok(self)
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H>(&mut self, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.add_route(Verb::Post, pattern.into(), Arc::new(handler))?;
        Ok(self)
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H>(&mut self, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.add_route(Verb::Put, pattern.into(), Arc::new(handler))?;
        Ok(self)
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H>(&mut self, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.add_route(Verb::Delete, pattern.into(), Arc::new(handler))?;
        Ok(self)
    }

    /// Adds a new route with `HEAD` method and the handler at the specified path.
    pub fn head<P, H>(&mut self, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.add_route(Verb::Head, pattern.into(), Arc::new(handler))?;
        Ok(self)
    }

    /// Adds a new route with `OPTIONS` method and the handler at the specified path.
    pub fn options<P, H>(&mut self, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.add_route(Verb::Options, pattern.into(), Arc::new(handler))?;
        Ok(self)
    }

    /// Appends a middleware. Middlewares of each kind run in the order they were added.
    pub fn middleware(&mut self, m: Middleware<E>) -> &mut Self {
        match m {
            Middleware::Before(m) => self.before.push(m),
            Middleware::After(m) => self.after.push(m),
        }
        self
    }

    /// Shortcut for `self.middleware(Middleware::before(handler))`.
    pub fn before<H>(&mut self, handler: H) -> &mut Self
    where
        H: Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static,
    {
        self.middleware(Middleware::before(handler))
    }

    /// Shortcut for `self.middleware(Middleware::after(handler))`.
    pub fn after<H>(&mut self, handler: H) -> &mut Self
    where
        H: Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static,
    {
        self.middleware(Middleware::after(handler))
    }

    /// Checks whether `pattern` is registered for `verb`. The verb is matched case-insensitively
    /// and an unsupported verb is never registered.
    pub fn exists<V: AsRef<str>>(&self, verb: V, pattern: &str) -> bool {
        verb.as_ref()
            .parse::<Verb>()
            .map(|verb| self.exists_for(verb, pattern))
            .unwrap_or(false)
    }

    /// The routes registered for `verb`, in registration order.
    pub fn routes(&self, verb: Verb) -> impl Iterator<Item = &Route<T, E>> {
        self.routes[verb.index()].iter()
    }

    /// Finds the first route of `verb` matching `path`, along with the captured parameters.
    pub fn find(&self, verb: Verb, path: &str) -> Option<(&Route<T, E>, RouteParams)> {
        self.routes[verb.index()]
            .iter()
            .find_map(|route| route.match_path(path).map(|params| (route, params)))
    }

    /// Dispatches the request supplied by `surface`, whatever its kind.
    ///
    /// The before middlewares run in order, then the matched handler, then the after middlewares.
    /// The first failure stops the pipeline and is returned as is. A failing after middleware
    /// discards the value the handler produced.
    pub fn run<S: Surface + ?Sized>(&self, surface: &S) -> crate::Result<T> {
        let raw_verb = surface.verb();
        let path = surface.path();

        let verb = match raw_verb.parse::<Verb>() {
            Ok(verb) if !self.routes[verb.index()].is_empty() => verb,
            _ => {
                return Err(Error::NoRoutesDefined {
                    verb: raw_verb.to_ascii_uppercase(),
                }
                .into())
            }
        };

        let ctx = surface.request_context(verb);
        let mut params = surface.params(verb);

        let (route, route_params) = self.find(verb, path).ok_or_else(|| Error::RouteNotFound {
            verb: verb.to_string(),
            path: path.to_owned(),
        })?;
        params.set_uri(route_params);

        tracing::debug!(verb = %verb, path, pattern = %route.pattern, "matched route");

        for (idx, m) in self.before.iter().enumerate() {
            tracing::trace!(idx, "running before middleware");
            m.process(&ctx)?;
        }

        let output = route.process(&ctx, &params)?;

        for (idx, m) in self.after.iter().enumerate() {
            tracing::trace!(idx, "running after middleware");
            m.process(&ctx)?;
        }

        Ok(output)
    }

    /// Dispatches a command-line request. Fails with [`Error::SurfaceMisuse`] for any other surface.
    pub fn run_cli<S: Surface + ?Sized>(&self, surface: &S) -> crate::Result<T> {
        if surface.mode() != Mode::Cli {
            return Err(Error::SurfaceMisuse("Cannot run in CLI mode when not using the command line interface".into()).into());
        }
        self.run(surface)
    }

    /// Dispatches a network request. Fails with [`Error::SurfaceMisuse`] for any other surface.
    pub fn run_http<S: Surface + ?Sized>(&self, surface: &S) -> crate::Result<T> {
        if surface.mode() != Mode::Http {
            return Err(Error::SurfaceMisuse("Cannot run in HTTP mode when not serving network requests".into()).into());
        }
        self.run(surface)
    }

    fn exists_for(&self, verb: Verb, pattern: &str) -> bool {
        self.routes[verb.index()].iter().any(|r| r.pattern == pattern)
    }

    fn add_route(&mut self, verb: Verb, pattern: String, handler: Handler<T, E>) -> crate::Result<()> {
        if self.exists_for(verb, &pattern) {
            tracing::warn!(verb = %verb, pattern = %pattern, "rejected duplicate route");
            return Err(Error::DuplicateRoute {
                verb: verb.to_string(),
                pattern,
            }
            .into());
        }

        let route = Route::new_with_shared_handler(pattern, verb, handler)?;
        tracing::debug!(verb = %verb, pattern = %route.pattern, "registered route");
        self.routes[verb.index()].push(route);
        Ok(())
    }
}

impl<T, E> Debug for Router<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ routes: {:?}, before: {:?}, after: {:?} }}",
            self.routes.iter().flatten().collect::<Vec<_>>(),
            self.before,
            self.after
        )
    }
}
