use crate::types::RequestContext;

pub use self::after::AfterMiddleware;
pub use self::before::BeforeMiddleware;

mod after;
mod before;

/// Enum type for all the middleware types. Please refer to the [Middleware](./index.html#middleware) for more info.
///
/// This `Middleware<E>` type accepts a single type parameter: `E`.
///
/// * The `E` represents any error type which will be used by route handlers and the middlewares. This error type must be
///   convertible into a boxed [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
#[derive(Debug)]
pub enum Middleware<E> {
    /// Variant for the before middleware. Refer to [Before Middleware](./index.html#before-middleware) for more info.
    Before(BeforeMiddleware<E>),

    /// Variant for the after middleware. Refer to [After Middleware](./index.html#after-middleware) for more info.
    After(AfterMiddleware<E>),
}

impl<E: Into<crate::RouteError> + 'static> Middleware<E> {
    /// Creates a middleware which runs before the matched route handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use routekit::{Middleware, Router};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Router<String, Infallible> {
    ///     let mut router = Router::new();
    ///     router.middleware(Middleware::before(|ctx| {
    ///         println!("{} {} {}", ctx.remote_addr(), ctx.verb(), ctx.path());
    ///         Ok(())
    ///     }));
    ///     router
    /// }
    /// # run();
    /// ```
    pub fn before<H>(handler: H) -> Middleware<E>
    where
        H: Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static,
    {
        Middleware::Before(BeforeMiddleware::new(handler))
    }

    /// Creates a middleware which runs after the matched route handler returned successfully.
    ///
    /// # Examples
    ///
    /// ```
    /// use routekit::{Middleware, Router};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Router<String, Infallible> {
    ///     let mut router = Router::new();
    ///     router.middleware(Middleware::after(|ctx| {
    ///         ctx.set_header("X-Powered-By: routekit");
    ///         Ok(())
    ///     }));
    ///     router
    /// }
    /// # run();
    /// ```
    pub fn after<H>(handler: H) -> Middleware<E>
    where
        H: Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static,
    {
        Middleware::After(AfterMiddleware::new(handler))
    }
}
