use crate::types::RouteParams;
use std::collections::HashMap;

/// A flat map of data supplied by an invocation surface, e.g. the decoded query string.
pub type DataMap = HashMap<String, String>;

/// The parameters handed to a route handler for a single dispatch.
///
/// It holds the values captured from the route pattern (the `uri` map) and the data supplied by
/// the invocation surface, keyed by name: `get` and `post` on the network surface, the lower-case
/// verb name on the command-line surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    uri: RouteParams,
    data: HashMap<String, DataMap>,
}

impl Params {
    pub fn new() -> Params {
        Params::default()
    }

    /// The values captured by the route pattern placeholders.
    pub fn uri(&self) -> &RouteParams {
        &self.uri
    }

    /// Shortcut for `self.uri().get(name)`.
    pub fn param<N: AsRef<str>>(&self, name: N) -> Option<&String> {
        self.uri.get(name)
    }

    /// Returns the surface data map registered under `key`, if any.
    pub fn data<K: AsRef<str>>(&self, key: K) -> Option<&DataMap> {
        self.data.get(key.as_ref())
    }

    /// The query data of a network request, or the `get` data of a command-line invocation.
    pub fn get(&self) -> Option<&DataMap> {
        self.data("get")
    }

    /// The body data of a network request, or the `post` data of a command-line invocation.
    pub fn post(&self) -> Option<&DataMap> {
        self.data("post")
    }

    /// Names of every data map present.
    pub fn data_keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub(crate) fn insert_data<K: Into<String>>(&mut self, key: K, map: DataMap) {
        self.data.insert(key.into(), map);
    }

    pub(crate) fn set_uri(&mut self, uri: RouteParams) {
        self.uri = uri;
    }
}
