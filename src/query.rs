//! Query parameter model and URL rendering.
//!
//! A [`UrlQueryMap`] holds the parsed query of a UI location. Values keep the
//! loose typing of browser query state ([`QueryValue`]): a parameter can be a
//! string, a number, a flag, or repeated.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Parsed query parameters, keyed by parameter name.
pub type UrlQueryMap = BTreeMap<String, QueryValue>;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum QueryValue {
    /// Flag parameter. `true` renders as a bare key.
    Bool(bool),
    /// Numeric parameter.
    Number(f64),
    /// Plain string parameter.
    Str(String),
    /// Repeated parameter, rendered once per item.
    List(Vec<String>),
}

impl fmt::Display for QueryValue {
    /// Formats the value the way the browser stringifies query state: lists
    /// are joined with commas and integral numbers have no fractional part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            QueryValue::Number(n) => write!(f, "{}", n),
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Number(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Number(value as f64)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        QueryValue::List(value)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(value: Vec<&str>) -> Self {
        QueryValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Percent-encode a URI component.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched and encodes everything
/// else as UTF-8 percent escapes, spaces included.
///
/// ```
/// use alertkit::query::encode_uri_component;
///
/// assert_eq!(encode_uri_component("my source/1"), "my%20source%2F1");
/// assert_eq!(encode_uri_component("(it's)!"), "(it's)!");
/// ```
pub fn encode_uri_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Decode a percent-encoded URI component.
///
/// Returns `None` if the escapes do not decode to valid UTF-8.
pub fn decode_uri_component(value: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(value).ok()
}

/// Encode a query key or value.
///
/// Like [`encode_uri_component`], except that `@ : $ , ;` stay readable and
/// `! ' ( ) *` are escaped.
pub fn encode_query_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%40", "@")
        .replace("%3A", ":")
        .replace("%24", "$")
        .replace("%2C", ",")
        .replace("%3B", ";")
}

/// Render query parameters as `key=value` pairs joined with `&`.
///
/// `Bool(true)` renders as a bare key and `Bool(false)` as `key=false`;
/// lists repeat the key once per item.
pub fn to_url_params(query: &UrlQueryMap) -> String {
    let mut parts = Vec::with_capacity(query.len());

    for (key, value) in query {
        let key = encode_query_component(key);
        match value {
            QueryValue::Bool(true) => parts.push(key),
            QueryValue::List(items) => parts.extend(
                items
                    .iter()
                    .map(|item| format!("{}={}", key, encode_query_component(item))),
            ),
            other => parts.push(format!(
                "{}={}",
                key,
                encode_query_component(&other.to_string())
            )),
        }
    }

    parts.join("&")
}

/// Append query parameters to `path`.
///
/// Returns `path` unchanged when there is nothing to render. Uses `&` as the
/// separator if `path` already carries a query.
///
/// ```
/// use alertkit::query::{render_url, UrlQueryMap};
///
/// let query = UrlQueryMap::from([("returnTo".to_string(), "/alerting/list".into())]);
/// assert_eq!(render_url("/a/view", &query), "/a/view?returnTo=%2Falerting%2Flist");
/// assert_eq!(render_url("/a/view", &UrlQueryMap::new()), "/a/view");
/// ```
pub fn render_url(path: &str, query: &UrlQueryMap) -> String {
    let params = to_url_params(query);
    if params.is_empty() {
        return path.to_string();
    }

    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, params)
}

/// Parse a raw query string (with or without the leading `?`).
///
/// Keys without `=` become `Bool(true)`; repeated keys collect into a
/// `List`. Pairs that are not valid percent-encoded UTF-8 are skipped.
///
/// ```
/// use alertkit::query::{parse_query, QueryValue};
///
/// let query = parse_query("?queryString=cpu+high&groupBy=a&groupBy=b&debug");
/// assert_eq!(query["queryString"], QueryValue::from("cpu high"));
/// assert_eq!(query["groupBy"], QueryValue::from(vec!["a", "b"]));
/// assert_eq!(query["debug"], QueryValue::Bool(true));
/// ```
pub fn parse_query(raw: &str) -> UrlQueryMap {
    let mut query = UrlQueryMap::new();

    for pair in raw.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }

        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (pair, None),
        };

        let Some(key) = decode_form_component(raw_key) else {
            continue;
        };
        let value = match raw_value {
            Some(raw_value) => match decode_form_component(raw_value) {
                Some(value) => QueryValue::Str(value),
                None => continue,
            },
            None => QueryValue::Bool(true),
        };

        match query.remove(&key) {
            None => {
                query.insert(key, value);
            }
            Some(existing) => {
                let mut items = match existing {
                    QueryValue::List(items) => items,
                    other => vec![other.to_string()],
                };
                items.push(value.to_string());
                query.insert(key, QueryValue::List(items));
            }
        }
    }

    query
}

fn decode_form_component(value: &str) -> Option<String> {
    let spaced = value.replace('+', " ");
    decode_uri_component(&spaced).map(Cow::into_owned)
}
