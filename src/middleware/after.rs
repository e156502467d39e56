use crate::types::RequestContext;
use std::fmt::{self, Debug, Formatter};

pub(crate) type Handler<E> = Box<dyn Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static>;

/// The after middleware type. Refer to [After Middleware](./index.html#after-middleware) for more info.
///
/// An after middleware only runs once the route handler returned successfully. If it fails, the
/// handler's result is discarded and the failure is returned from the dispatch instead.
pub struct AfterMiddleware<E> {
    pub(crate) handler: Handler<E>,
}

impl<E: Into<crate::RouteError> + 'static> AfterMiddleware<E> {
    /// Creates an after middleware with a handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use routekit::{AfterMiddleware, Middleware, Router};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Router<String, Infallible> {
    ///     let mut router = Router::new();
    ///     router.middleware(Middleware::After(AfterMiddleware::new(|ctx| {
    ///         /* Do some operations */
    ///         Ok(())
    ///     })));
    ///     router
    /// }
    /// # run();
    /// ```
    pub fn new<H>(handler: H) -> AfterMiddleware<E>
    where
        H: Fn(&RequestContext) -> Result<(), E> + Send + Sync + 'static,
    {
        AfterMiddleware {
            handler: Box::new(handler),
        }
    }

    pub(crate) fn process(&self, ctx: &RequestContext) -> crate::Result<()> {
        (self.handler)(ctx).map_err(Into::into)
    }
}

impl<E> Debug for AfterMiddleware<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AfterMiddleware")
    }
}
