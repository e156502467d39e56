use crate::types::RequestContext;
use std::fmt::{self, Debug, Formatter};

pub(crate) type Handler<E> = Box<dyn Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static>;

/// The before middleware type. Refer to [Before Middleware](./index.html#before-middleware) for more info.
///
/// This `BeforeMiddleware<E>` type accepts a single type parameter: `E`.
///
/// * The `E` represents any error type which will be used by route handlers and the middlewares. This error type must be
///   convertible into a boxed [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
pub struct BeforeMiddleware<E> {
    pub(crate) handler: Handler<E>,
}

impl<E: Into<crate::RouteError> + 'static> BeforeMiddleware<E> {
    /// Creates a before middleware with a handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use routekit::{BeforeMiddleware, Middleware, Router};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Router<String, Infallible> {
    ///     let mut router = Router::new();
    ///     router.middleware(Middleware::Before(BeforeMiddleware::new(|ctx| {
    ///         /* Do some operations */
    ///         Ok(())
    ///     })));
    ///     router
    /// }
    /// # run();
    /// ```
    pub fn new<H>(handler: H) -> BeforeMiddleware<E>
    where
        H: Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static,
    {
        BeforeMiddleware {
            handler: Box::new(handler),
        }
    }

    pub(crate) fn process(&self, ctx: &RequestContext) -> crate::Result<()> {
        (self.handler)(ctx).map_err(Into::into)
    }
}

impl<E> Debug for BeforeMiddleware<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BeforeMiddleware")
    }
}
