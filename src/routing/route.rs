//! Registered routes and the fixed method set.
//!
//! # Responsibilities
//! - Map HTTP methods to a compile-time table index
//! - Hold one registered handler chain with its compiled pattern
//! - Decide whether a normalised request path selects this route
//!
//! # Design Decisions
//! - Routes are immutable once built and shared via `Arc`
//! - Middleware routes (`Use`) match by prefix; method routes match exactly
//! - Parameterless middleware uses a plain string prefix test, so `/te`
//!   also covers `/test`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::dispatch::handler::Handler;
use crate::routing::pattern::PathPattern;

/// HTTP methods with their own route sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// Number of methods, and so of route sequences in a table.
    pub const COUNT: usize = 9;

    /// Every method, ordered by table index.
    pub const ALL: [Method; Method::COUNT] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Connect,
        Method::Options,
        Method::Trace,
        Method::Patch,
    ];

    /// Position of this method's sequence in the route table.
    pub const fn index(self) -> usize {
        match self {
            Method::Get => 0,
            Method::Head => 1,
            Method::Post => 2,
            Method::Put => 3,
            Method::Delete => 4,
            Method::Connect => 5,
            Method::Options => 6,
            Method::Trace => 7,
            Method::Patch => 8,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request method outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// A handler chain bound to a path.
pub struct Route {
    /// `None` for middleware registered on every method.
    method: Option<Method>,
    pattern: PathPattern,
    handlers: Vec<Handler>,
    root: bool,
    middleware: bool,
}

impl Route {
    /// Build a route. `path` must already be normalised to start with `/`.
    pub fn new(method: Option<Method>, path: &str, handlers: Vec<Handler>) -> Self {
        Self {
            method,
            pattern: PathPattern::compile(path),
            handlers,
            root: path == "/",
            middleware: method.is_none(),
        }
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn path(&self) -> &str {
        self.pattern.raw()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn param_names(&self) -> &[String] {
        self.pattern.param_names()
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    pub fn is_middleware(&self) -> bool {
        self.middleware
    }

    /// Test a normalised request path (no trailing `/` except root).
    ///
    /// Returns the extracted parameter values on a match.
    pub fn matches(&self, path: &str) -> Option<Vec<String>> {
        if self.root && (path.is_empty() || path == "/") {
            return Some(Vec::new());
        }

        if self.pattern.has_params() {
            if let Some(values) = self.pattern.match_path(path, self.middleware) {
                return Some(values);
            }
        }

        if self.middleware && (self.root || path.starts_with(self.path())) {
            return Some(Vec::new());
        }

        (self.path() == path).then(Vec::new)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path())
            .field("handlers", &self.handlers.len())
            .field("middleware", &self.middleware)
            .finish()
    }
}
