//! Clean URL parsing.
//!
//! Turns the raw request metadata a web server hands to a script into the
//! pieces an application needs to route and to build absolute links.
//!
//! Possible shapes of `segments`:
//!
//! 1. `www.example.com/Foo/` gives `["Foo"]`, the view name.
//! 2. `www.example.com/en/Foo/` gives `["en", "Foo"]`, a language code
//!    followed by the view name. The language code is a convention only.
//! 3. `www.example.com/Foo/Bar` gives `["Foo", "Bar"]`, the view name and a
//!    parameter used by that view.
//!
//! `segments` is empty if only the base path was requested.

use crate::request::ServerEnv;
use std::fmt;

/// Paths that mean "nothing past the root".
const DEFAULT_DOCUMENTS: [&str; 3] = ["", "index.php", "index.html"];

/// Scheme part of the base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Reads a CGI style `HTTPS` indicator. IIS sends `off` for plain HTTP;
    /// `off` is compared ignoring ASCII case.
    pub fn from_https_flag(https: Option<&str>) -> Self {
        match https {
            Some(flag) if !flag.is_empty() && !flag.eq_ignore_ascii_case("off") => Protocol::Https,
            _ => Protocol::Http,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http://",
            Protocol::Https => "https://",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Deployment directory on the server, with trailing separator.
    pub document_root: String,
    /// URL path the application is mounted under, e.g. `/` or `/app/`.
    pub url_root: String,
    pub protocol: Protocol,
    /// `protocol + server name + url_root`, for linking assets.
    pub base_path: String,
    pub segments: Vec<String>,
}

/// Parses the request described by `env`.
pub fn parse_env(env: &ServerEnv) -> ParsedRequest {
    parse(
        &env.request_uri,
        &env.script_filename,
        &env.script_name,
        &env.server_name,
        env.https.as_deref(),
    )
}

/// Parses a request URI against the script that serves it.
///
/// Never fails: odd input gives odd roots or an empty segment list.
pub fn parse(
    request_uri: &str,
    script_filename: &str,
    script_name: &str,
    server_name: &str,
    https: Option<&str>,
) -> ParsedRequest {
    let uri = strip_query_and_fragment(request_uri);

    let chop = basename(script_name).len();
    let document_root = chop_end(script_filename, chop).to_string();
    let url_root = chop_end(script_name, chop).to_string();

    let protocol = Protocol::from_https_flag(https);
    let base_path = format!("{}{}{}", protocol.as_str(), server_name, url_root);

    let path = if url_root == "/" {
        uri
    } else {
        strip_url_root(uri, &url_root)
    };

    ParsedRequest {
        segments: split_segments(path),
        document_root,
        url_root,
        protocol,
        base_path,
    }
}

/// Cuts the URI at the first `?` or `#`.
pub fn strip_query_and_fragment(uri: &str) -> &str {
    match uri.find(['?', '#']) {
        Some(offset) => &uri[..offset],
        None => uri,
    }
}

/// Last component of a `/` separated path, ignoring trailing slashes.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Drops `count` bytes from the end of `s`, or everything if that is not
/// possible on a character boundary.
fn chop_end(s: &str, count: usize) -> &str {
    s.len()
        .checked_sub(count)
        .and_then(|end| s.get(..end))
        .unwrap_or_default()
}

fn strip_url_root<'a>(uri: &'a str, url_root: &str) -> &'a str {
    if let Some(rest) = uri.strip_prefix(url_root) {
        rest
    } else if !url_root.is_empty() && uri == url_root.trim_end_matches('/') {
        ""
    } else {
        uri
    }
}

/// Splits a root relative path into decoded segments.
///
/// Entities are decoded per segment, so an encoded slash stays inside its
/// segment instead of becoming a separator.
pub fn split_segments(path: &str) -> Vec<String> {
    let path = path.trim_matches('/');
    if DEFAULT_DOCUMENTS.contains(&path) {
        return Vec::new();
    }

    path.split('/')
        .map(|segment| html_escape::decode_html_entities(segment).into_owned())
        .collect()
}
