//! The invocation surfaces a [`Router`](crate::Router) can be dispatched from.
//!
//! A surface supplies the raw verb and path of a request, and knows how to build the request
//! context and the surface-specific part of the params context. The router does the rest.

use crate::types::{Params, RequestContext};
use crate::{Mode, Verb};

pub use self::cli::{usage, CommandLine, Invocation};
pub use self::network::NetworkRequest;

mod cli;
mod network;

/// A source of requests for the router.
pub trait Surface {
    /// The runtime mode this surface belongs to, either [`Mode::Cli`] or [`Mode::Http`].
    fn mode(&self) -> Mode;

    /// The raw request verb, as supplied.
    fn verb(&self) -> &str;

    /// The request path to match.
    fn path(&self) -> &str;

    /// Builds the request context for a dispatch of `verb`.
    fn request_context(&self, verb: Verb) -> RequestContext;

    /// Builds the base params context for a dispatch of `verb`, without the route parameters.
    fn params(&self, verb: Verb) -> Params;
}
