use super::Surface;
use crate::types::{DataMap, Params, RequestContext, RequestContextBuilder, ResponseHeaders, CLI_MARKER, CLI_REMOTE_ADDR};
use crate::{Mode, Verb};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATA_TOKEN_RE: Regex = Regex::new(r"(?s)^([A-Za-z0-9_]+)=(.+)$").unwrap();
}

const HELP_FLAGS: [&str; 2] = ["--help", "-h"];

/// The outcome of parsing the command-line tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The tokens describe a request to dispatch.
    Dispatch(CommandLine),
    /// Help was requested or the tokens were incomplete. Holds the usage text to print.
    Usage(String),
}

/// A request given as process arguments: `<path> <verb> [key=value ...]`.
///
/// The `key=value` tokens become a single data map keyed by the lower-case verb name. The map is
/// left out of the params context entirely when no such token was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    path: String,
    verb: String,
    data: Option<DataMap>,
}

impl CommandLine {
    /// Parses the process arguments, excluding the program name.
    ///
    /// `program` is only used in the usage text.
    pub fn parse<I, S>(program: &str, tokens: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<S> = tokens.into_iter().collect();

        let (path, verb) = match tokens.as_slice() {
            [first, ..] if HELP_FLAGS.contains(&first.as_ref()) => return Invocation::Usage(usage(program)),
            [path, verb, ..] => (path.as_ref(), verb.as_ref()),
            _ => return Invocation::Usage(usage(program)),
        };

        let mut data = DataMap::new();
        for token in &tokens[2..] {
            let token = token.as_ref();
            match DATA_TOKEN_RE.captures(token) {
                Some(caps) => {
                    data.insert(caps[1].to_owned(), caps[2].to_owned());
                }
                None => tracing::debug!(token, "ignoring argument which isn't a key=value pair"),
            }
        }

        Invocation::Dispatch(CommandLine {
            path: path.to_owned(),
            verb: verb.to_owned(),
            data: if data.is_empty() { None } else { Some(data) },
        })
    }

    /// The `key=value` data, if any was given.
    pub fn data(&self) -> Option<&DataMap> {
        self.data.as_ref()
    }
}

/// The usage text printed for `--help` or incomplete arguments.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {} <uri> <method> [data]\n\turi: Uri to run\n\tmethod: HTTP method to use ({})\n\tdata: GET or POST data eg. name=hello\n",
        program,
        Verb::names()
    )
}

impl Surface for CommandLine {
    fn mode(&self) -> Mode {
        Mode::Cli
    }

    fn verb(&self) -> &str {
        &self.verb
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn request_context(&self, verb: Verb) -> RequestContext {
        RequestContextBuilder::new(verb, self.path.clone())
            .remote_addr(CLI_REMOTE_ADDR)
            .user_agent(CLI_MARKER)
            .referer(CLI_MARKER)
            .https(false)
            .headers(ResponseHeaders::new())
            .build()
    }

    fn params(&self, verb: Verb) -> Params {
        let mut params = Params::new();
        if let Some(data) = &self.data {
            params.insert_data(verb.as_lower_str(), data.clone());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(tokens: &[&str]) -> CommandLine {
        match CommandLine::parse("routekit", tokens.iter().copied()) {
            Invocation::Dispatch(cmd) => cmd,
            Invocation::Usage(text) => panic!("unexpected usage: {}", text),
        }
    }

    #[test]
    fn should_collect_data_tokens_under_lowercase_verb() {
        let cmd = dispatch(&["/hello", "GET", "hello=world", "name=jim"]);
        assert_eq!(cmd.path(), "/hello");
        assert_eq!(cmd.verb(), "GET");

        let params = cmd.params(Verb::Get);
        let get = params.data("get").unwrap();
        assert_eq!(get.len(), 2);
        assert_eq!(get.get("hello").map(String::as_str), Some("world"));
        assert_eq!(get.get("name").map(String::as_str), Some("jim"));
        assert!(params.data("GET").is_none());
        assert!(params.post().is_none());
    }

    #[test]
    fn should_scan_every_remaining_token() {
        let cmd = dispatch(&["/x", "post", "a=1"]);
        assert_eq!(cmd.data().unwrap().get("a").map(String::as_str), Some("1"));

        let cmd = dispatch(&["/x", "post", "junk", "eq=a=b", "=nokey", "novalue=", "b_2=two"]);
        let data = cmd.data().unwrap();
        assert_eq!(data.get("eq").map(String::as_str), Some("a=b"));
        assert_eq!(data.get("b_2").map(String::as_str), Some("two"));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn should_omit_data_when_no_tokens_given() {
        let cmd = dispatch(&["/hello", "GET"]);
        assert!(cmd.data().is_none());
        assert_eq!(cmd.params(Verb::Get).data_keys().count(), 0);
    }

    #[test]
    fn should_print_usage_for_help_or_missing_tokens() {
        for tokens in [vec![], vec!["/hello"], vec!["--help", "GET"], vec!["-h"]] {
            match CommandLine::parse("prog", tokens) {
                Invocation::Usage(text) => {
                    assert!(text.starts_with("Usage: prog <uri> <method> [data]"));
                    assert!(text.contains("DELETE, GET, HEAD, OPTIONS, POST, PUT"));
                }
                other => panic!("unexpected invocation: {:?}", other),
            }
        }
    }

    #[test]
    fn should_use_sentinel_request_context() {
        let ctx = dispatch(&["/hello", "get"]).request_context(Verb::Get);
        assert_eq!(ctx.remote_addr().to_string(), "127.0.0.1");
        assert_eq!(ctx.user_agent(), "cli");
        assert_eq!(ctx.referer(), "cli");
        assert!(!ctx.is_https());
    }
}
