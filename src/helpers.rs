use crate::types::DataMap;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

pub(crate) fn percent_decode_request_path(val: &str) -> Result<String, std::str::Utf8Error> {
    percent_decode_str(val).decode_utf8().map(|val| val.to_string())
}

/// Decodes an `application/x-www-form-urlencoded` string, e.g. a query string, into a flat map.
///
/// Pairs that aren't valid UTF-8 once decoded are skipped. A key without `=` maps to an empty
/// value, and a repeated key keeps its last value.
pub(crate) fn parse_urlencoded(input: &str) -> DataMap {
    let mut map = DataMap::new();

    for pair in input.split('&').filter(|p| !p.is_empty()) {
        let (key, val) = pair.split_once('=').unwrap_or((pair, ""));

        match (decode_form_component(key), decode_form_component(val)) {
            (Some(key), Some(val)) if !key.is_empty() => {
                map.insert(key, val);
            }
            _ => {
                tracing::debug!(pair, "skipping undecodable form pair");
            }
        }
    }

    map
}

fn decode_form_component(val: &str) -> Option<String> {
    let val: Cow<'_, str> = if val.contains('+') {
        Cow::Owned(val.replace('+', " "))
    } else {
        Cow::Borrowed(val)
    };

    percent_decode_str(&val).decode_utf8().ok().map(|v| v.into_owned())
}
