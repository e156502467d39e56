use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r":([^/*]+)(\*)?").unwrap();
}

const SEGMENT_CAPTURE: &str = "([^/]+)";
const CATCH_ALL_CAPTURE: &str = "(.+)";

/// Compiles a route pattern into a regex matching the whole path, along with the placeholder
/// names in the order they appear.
///
/// `:name` captures a single path segment, `:name*` captures the rest of the path. Everything
/// else is matched literally.
pub(crate) fn generate_exact_match_regex(pattern: &str) -> Result<(Regex, Vec<String>), regex::Error> {
    let mut re_str = String::with_capacity(pattern.len() + 8);
    let mut params = Vec::new();
    let mut last = 0;

    re_str.push_str("(?s)^");

    for caps in PLACEHOLDER_RE.captures_iter(pattern) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        re_str.push_str(&regex::escape(&pattern[last..whole.start()]));

        if caps.get(2).is_some() {
            re_str.push_str(CATCH_ALL_CAPTURE);
        } else {
            re_str.push_str(SEGMENT_CAPTURE);
        }

        params.push(name.as_str().to_owned());
        last = whole.end();
    }

    re_str.push_str(&regex::escape(&pattern[last..]));
    re_str.push('$');

    Ok((Regex::new(&re_str)?, params))
}
