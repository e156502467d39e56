pub use self::params::{DataMap, Params};
pub use self::request_context::{RequestContext, RequestContextBuilder, ResponseHeaders, CLI_MARKER, CLI_REMOTE_ADDR};
pub use self::route_params::RouteParams;

mod params;
mod request_context;
mod route_params;
