use crate::regex_generator::generate_exact_match_regex;
use crate::types::{Params, RequestContext, RouteParams};
use crate::{Error, Verb};
use regex::Regex;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

pub(crate) type Handler<T, E> = Arc<dyn Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static>;

/// Represents a single route.
///
/// A route consists of a pattern, a verb and a handler. It shouldn't be created directly, use the
/// [Router](./struct.Router.html) registration methods to create a route.
///
/// This `Route<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the value produced by the route handlers.
/// * The `E` represents any error type which will be used by route handlers and the middlewares. This error type must be
///   convertible into a boxed [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// # Examples
///
/// ```
/// use routekit::{Params, RequestContext, Router};
/// use std::convert::Infallible;
///
/// fn home_handler(_: &RequestContext, _: &Params) -> Result<String, Infallible> {
///     Ok("home".to_owned())
/// }
///
/// fn run() -> Router<String, Infallible> {
///     let mut router = Router::new();
///     router.get("/", home_handler).unwrap();
///     router
/// }
/// # run();
/// ```
pub struct Route<T, E> {
    pub(crate) pattern: String,
    pub(crate) regex: Regex,
    route_params: Vec<String>,
    pub(crate) handler: Handler<T, E>,
    pub(crate) verb: Verb,
}

impl<T, E: Into<crate::RouteError> + 'static> Route<T, E> {
    pub(crate) fn new_with_shared_handler<P: Into<String>>(
        pattern: P,
        verb: Verb,
        handler: Handler<T, E>,
    ) -> crate::Result<Route<T, E>> {
        let pattern = pattern.into();
        let (re, params) = generate_exact_match_regex(pattern.as_str()).map_err(|e| Error::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        Ok(Route {
            pattern,
            regex: re,
            route_params: params,
            handler,
            verb,
        })
    }

    #[cfg(test)]
    pub(crate) fn new<P, H>(pattern: P, verb: Verb, handler: H) -> crate::Result<Route<T, E>>
    where
        P: Into<String>,
        H: Fn(&RequestContext, &Params) -> Result<T, E> + Send + Sync + 'static,
    {
        Route::new_with_shared_handler(pattern, verb, Arc::new(handler))
    }

    /// The raw pattern this route was registered with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The verb this route was registered for.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The placeholder names of the pattern, in order of appearance.
    pub fn param_names(&self) -> &[String] {
        &self.route_params
    }

    /// Matches `target_path` against this route, returning the captured parameters on success.
    pub(crate) fn match_path(&self, target_path: &str) -> Option<RouteParams> {
        let caps = self.regex.captures(target_path)?;
        let mut route_params = RouteParams::with_capacity(self.route_params.len());

        let mut iter = caps.iter();
        // Skip the first match because it's the whole path.
        iter.next();
        for param in &self.route_params {
            if let Some(Some(g)) = iter.next() {
                route_params.set(param.clone(), g.as_str());
            }
        }

        Some(route_params)
    }

    pub(crate) fn process(&self, ctx: &RequestContext, params: &Params) -> crate::Result<T> {
        (self.handler)(ctx, params).map_err(Into::into)
    }
}

impl<T, E> Debug for Route<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ pattern: {:?}, regex: {:?}, route_params: {:?}, verb: {:?} }}",
            self.pattern, self.regex, self.route_params, self.verb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RequestContextBuilder;
    use std::convert::Infallible;

    fn echo(_: &RequestContext, params: &Params) -> Result<String, Infallible> {
        Ok(params.param("name").cloned().unwrap_or_default())
    }

    #[test]
    fn should_extract_params_in_order() {
        let route: Route<String, Infallible> = Route::new("/users/:id/books/:book", Verb::Get, echo).unwrap();
        assert_eq!(route.param_names(), ["id", "book"]);

        let params = route.match_path("/users/7/books/dune").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("7"));
        assert_eq!(params.get("book").map(String::as_str), Some("dune"));
        assert!(params.has("book"));
        assert!(!params.has("chapter"));

        let mut names: Vec<&String> = params.params_names().collect();
        names.sort();
        assert_eq!(names, ["book", "id"]);
        assert!(route.match_path("/users/7/books/dune/ch1").is_none());
    }

    #[test]
    fn should_keep_last_value_for_duplicate_names() {
        let route: Route<String, Infallible> = Route::new("/:id/and/:id", Verb::Get, echo).unwrap();
        let params = route.match_path("/first/and/second").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id").map(String::as_str), Some("second"));
    }

    #[test]
    fn should_invoke_handler() {
        let route: Route<String, Infallible> = Route::new("/hi/:name", Verb::Get, echo).unwrap();
        let mut params = Params::new();
        params.set_uri(route.match_path("/hi/jim").unwrap());
        let ctx = RequestContextBuilder::new(Verb::Get, "/hi/jim").build();

        assert_eq!(route.process(&ctx, &params).unwrap(), "jim");
    }
}
