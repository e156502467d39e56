use http::StatusCode;
use thiserror::Error as ThisError;

/// The error type used by the route boxed error.
///
/// Handler and middleware errors are never converted into this type. They are boxed into a
/// [`RouteError`] as they are, so the caller can downcast them back to their original type.
pub type RouteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The errors raised by the router itself.
///
/// Every variant carries a human-readable message. The dispatch-time variants also map to an
/// HTTP-like status code, see [`Error::status`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// Registration referenced one or more verbs outside of the supported set.
    #[error("Invalid HTTP method found in: {}, valid methods are {}", .found.join(", "), crate::Verb::names())]
    InvalidVerb {
        /// Every rejected verb, as it was supplied.
        found: Vec<String>,
    },

    /// Registration targeted a (verb, pattern) pair that is already present.
    #[error("URI: {pattern} is already defined for {verb} method")]
    DuplicateRoute { verb: String, pattern: String },

    /// A handler or middleware value doesn't satisfy the invocable contract.
    #[error("Callback function is not callable: {0}")]
    NotInvocable(String),

    /// Dispatch was attempted for a verb which has no routes at all.
    #[error("No routes have been defined for {verb} method")]
    NoRoutesDefined { verb: String },

    /// No registered pattern for the verb matched the path.
    #[error("No route found for: {verb}, {path}")]
    RouteNotFound { verb: String, path: String },

    /// A surface-specific run was called from the wrong runtime mode.
    #[error("{0}")]
    SurfaceMisuse(String),

    /// The regex engine refused a compiled route pattern.
    #[error("Could not create an exact match regex for the route path {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The HTTP-like status code of this error, if it has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::NoRoutesDefined { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Error::RouteNotFound { .. } => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }

    /// Looks for a router error inside a boxed dispatch error.
    pub fn find(err: &RouteError) -> Option<&Error> {
        err.downcast_ref::<Error>()
    }
}
