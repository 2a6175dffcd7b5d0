//! Transport-side request data consumed by the dispatcher.
//!
//! # Responsibilities
//! - Capture the method as received and the percent-decoded path
//! - Decode query string and urlencoded form bodies into key/value pairs
//! - Answer first-value lookups for query and form keys
//!
//! # Design Decisions
//! - Decoding happens once, before dispatch, so handlers never block on it
//! - Form lookups consult the query first, then the body
//! - Paths are decoded before matching, with repeated `/` collapsed, so
//!   `/a//b` and `/a/b` select the same route and params come back decoded
//! - Multipart bodies are not decoded

use axum::http::{header, request::Parts};
use percent_encoding::percent_decode_str;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A parsed request as seen by handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Attach a raw query string (without the leading `?`).
    pub fn with_query(mut self, raw: &str) -> Self {
        self.query = decode_pairs(raw.as_bytes());
        self
    }

    /// Attach a urlencoded form body.
    pub fn with_form(mut self, body: &[u8]) -> Self {
        self.form = decode_pairs(body);
        self
    }

    /// Build from the head of an HTTP request and its collected body.
    pub fn from_parts(parts: &Parts, body: &[u8]) -> Self {
        let path = decode_path(parts.uri.path());
        let mut request = Self::new(parts.method.as_str(), path);
        if let Some(query) = parts.uri.query() {
            request = request.with_query(query);
        }
        if is_form(parts) {
            request = request.with_form(body);
        }
        request
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First query value for `key`.
    pub fn query(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    /// First non-empty value for `key` in the query, then in the form body.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
            .filter(|v| !v.is_empty())
            .or_else(|| lookup(&self.form, key))
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn decode_pairs(raw: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw).into_owned().collect()
}

/// Percent-decode `raw` and collapse runs of `/` into one.
///
/// Invalid UTF-8 after decoding is replaced rather than rejected.
pub fn decode_path(raw: &str) -> String {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let mut path = String::with_capacity(decoded.len());
    for ch in decoded.chars() {
        if ch == '/' && path.ends_with('/') {
            continue;
        }
        path.push(ch);
    }
    path
}

fn is_form(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}
