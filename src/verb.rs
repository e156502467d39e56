use crate::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The request verbs a route can be registered for.
///
/// Parsing is case-insensitive; the canonical form is upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Delete,
    Get,
    Head,
    Options,
    Post,
    Put,
}

impl Verb {
    /// Every supported verb, in canonical order.
    pub const ALL: [Verb; 6] = [Verb::Delete, Verb::Get, Verb::Head, Verb::Options, Verb::Post, Verb::Put];

    /// The canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Delete => "DELETE",
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
            Verb::Post => "POST",
            Verb::Put => "PUT",
        }
    }

    /// The lower-case name, used as the data key on the command-line surface.
    pub fn as_lower_str(&self) -> &'static str {
        match self {
            Verb::Delete => "delete",
            Verb::Get => "get",
            Verb::Head => "head",
            Verb::Options => "options",
            Verb::Post => "post",
            Verb::Put => "put",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    pub(crate) fn names() -> String {
        Verb::ALL.iter().map(Verb::as_str).collect::<Vec<_>>().join(", ")
    }

    /// Parses every verb in `verbs`, rejecting the whole set if any entry is invalid.
    ///
    /// An empty set is invalid too: it can't register anything.
    pub(crate) fn parse_all<I, S>(verbs: I) -> crate::Result<Vec<Verb>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        let mut invalid = Vec::new();

        for verb in verbs {
            let verb = verb.as_ref();
            match verb.parse::<Verb>() {
                Ok(v) => parsed.push(v),
                Err(_) => invalid.push(verb.to_owned()),
            }
        }

        if parsed.is_empty() || !invalid.is_empty() {
            return Err(Error::InvalidVerb { found: invalid }.into());
        }

        Ok(parsed)
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::InvalidVerb { found: vec![s.to_owned()] })
    }
}

impl TryFrom<&http::Method> for Verb {
    type Error = Error;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

impl From<Verb> for http::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Delete => http::Method::DELETE,
            Verb::Get => http::Method::GET,
            Verb::Head => http::Method::HEAD,
            Verb::Options => http::Method::OPTIONS,
            Verb::Post => http::Method::POST,
            Verb::Put => http::Method::PUT,
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
