use crate::middleware::Middleware;
use crate::router::Router;
use crate::types::{Params, RequestContext};

/// Builder for the [Router](./struct.Router.html) type.
///
/// Registration errors don't surface one by one: the first one is kept and returned from
/// [`build`](#method.build), and every call after it is ignored.
///
/// # Examples
///
/// ```
/// use routekit::{Middleware, Router};
/// use std::convert::Infallible;
///
/// fn router() -> Router<String, Infallible> {
///     Router::builder()
///         .middleware(Middleware::before(|ctx| {
///             println!("{} {}", ctx.verb(), ctx.path());
///             Ok(())
///         }))
///         .get("/", |_, _| Ok("Home page".to_owned()))
///         .get("/users/:userId", |_, params| Ok(format!("User {}", params.param("userId").unwrap())))
///         .build()
///         .unwrap()
/// }
/// # router();
/// ```
pub struct RouterBuilder<T, E> {
    inner: crate::Result<Router<T, E>>,
}

impl<T: 'static, E: Into<crate::RouteError> + 'static> RouterBuilder<T, E> {
    /// Creates a new `RouterBuilder` instance with default options.
    pub fn new() -> RouterBuilder<T, E> {
        RouterBuilder::default()
    }

    /// Creates a new [Router](./struct.Router.html) instance from the added configuration.
    pub fn build(self) -> crate::Result<Router<T, E>> {
        self.inner
    }

    fn and_then<F: FnOnce(&mut Router<T, E>) -> crate::Result<()>>(self, func: F) -> Self {
        RouterBuilder {
            inner: self.inner.and_then(|mut router| {
                func(&mut router)?;
                Ok(router)
            }),
        }
    }

    /// Adds a new route for a verb given by name.
    pub fn add<V, P, H>(self, verb: V, pattern: P, handler: H) -> Self
    where
        V: AsRef<str>,
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.add(verb, pattern, handler).map(|_| ()))
    }

    /// Adds a new route for every verb of `verbs`.
    pub fn any<I, S, P, H>(self, verbs: I, pattern: P, handler: H) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.any(verbs, pattern, handler).map(|_| ()))
    }

    /// Adds a new route with `GET` method and the handler at the specified path.
    pub fn get<P, H>(self, pattern: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.get(pattern, handler).map(|_| ()))
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H>(self, pattern: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.post(pattern, handler).map(|_| ()))
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H>(self, pattern: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.put(pattern, handler).map(|_| ()))
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H>(self, pattern: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.delete(pattern, handler).map(|_| ()))
    }

    /// Adds a new route with `HEAD` method and the handler at the specified path.
    pub fn head<P, H>(self, pattern: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.head(pattern, handler).map(|_| ()))
    }

    /// Adds a new route with `OPTIONS` method and the handler at the specified path.
    pub fn options<P, H>(self, pattern: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        self.and_then(move |router| router.options(pattern, handler).map(|_| ()))
    }

    /// Adds a single middleware. A before middleware can be created by [`Middleware::before`](./enum.Middleware.html#method.before) method and an after
    /// middleware can be created by [`Middleware::after`](./enum.Middleware.html#method.after) method.
    pub fn middleware(self, m: Middleware<E>) -> Self {
        self.and_then(move |router| {
            router.middleware(m);
            Ok(())
        })
    }
}

impl<T, E> Default for RouterBuilder<T, E> {
    fn default() -> RouterBuilder<T, E> {
        RouterBuilder {
            inner: Ok(Router::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{CommandLine, Error, Invocation, Router, Verb};
    use std::convert::Infallible;

    #[test]
    fn should_keep_first_registration_error() {
        let res: crate::Result<Router<&'static str, Infallible>> = Router::builder()
            .get("/a", |_, _| Ok("a"))
            .add("bogus", "/b", |_, _| Ok("b"))
            .get("/a", |_, _| Ok("dup"))
            .build();

        let err = res.unwrap_err();
        assert_eq!(
            Error::find(&err),
            Some(&Error::InvalidVerb {
                found: vec!["bogus".into()]
            })
        );
    }

    #[test]
    fn should_reject_empty_verb_set() {
        let res: crate::Result<Router<&'static str, Infallible>> = Router::builder()
            .any(Vec::<String>::new(), "/p", |_, _| Ok("p"))
            .build();

        let err = res.unwrap_err();
        assert_eq!(Error::find(&err), Some(&Error::InvalidVerb { found: Vec::new() }));
    }

    #[test]
    fn should_build_working_router() {
        let router: Router<String, Infallible> = Router::builder()
            .get("/hi/:name", |_, p| Ok(format!("Hello, {}", p.param("name").unwrap())))
            .post("/test", |_, _| Ok("posted".to_owned()))
            .any(["PUT", "DELETE"], "/item/:id", |ctx, p| Ok(format!("{} {}", ctx.verb(), p.param("id").unwrap())))
            .build()
            .unwrap();

        assert_eq!(router.routes(Verb::Get).count(), 1);
        assert!(router.exists("delete", "/item/:id"));

        match CommandLine::parse("app", ["/item/9", "put"]) {
            Invocation::Dispatch(cmd) => assert_eq!(router.run(&cmd).unwrap(), "PUT 9"),
            Invocation::Usage(_) => unreachable!(),
        }
    }
}
