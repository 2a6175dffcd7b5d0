//! Per-request state handed to every handler.
//!
//! # Responsibilities
//! - Carry the normalised method and path of one request
//! - Track scan position in the route table and position in the chain
//! - Expose parameters, query and form values, and the response under construction
//! - Drive continuation (`next`) and the fallback 404
//!
//! # Design Decisions
//! - Continuation is direct recursion: `next` calls the following handler on
//!   the same stack, so code after `next()` runs once the rest of the chain returns
//! - Each hop costs a few stack frames on the dispatching thread (a blocking
//!   pool thread, 2 MiB by default). Chains of a few hundred `next()` hops
//!   are fine; thousands can overflow, which aborts the process
//! - A context is owned by exactly one request between acquire and release
//! - All references to the route table, route and transport are dropped on
//!   release so nothing leaks into the next request

use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::route::{Method, Route};
use crate::routing::table::RouteTable;

/// Status and body sent when no route handles the request.
pub const NOT_FOUND_STATUS: u16 = 404;
pub const NOT_FOUND_BODY: &str = "Not Found";

/// Mutable state of one in-flight request.
#[derive(Default)]
pub struct Context {
    table: Option<Arc<RouteTable>>,
    method: Option<Method>,
    path: String,
    route: Option<Arc<Route>>,
    values: Vec<String>,
    /// Last scanned position in the method's route sequence.
    route_cursor: Option<usize>,
    handler_cursor: usize,
    request: Request,
    response: Response,
}

impl Context {
    /// Bind this context to a request, discarding any previous state.
    pub(crate) fn reset(&mut self, table: Arc<RouteTable>, request: Request) {
        self.method = request.method().parse().ok();
        self.path = normalize_request_path(request.path());
        self.table = Some(table);
        self.route = None;
        self.values.clear();
        self.route_cursor = None;
        self.handler_cursor = 0;
        self.request = request;
        self.response = Response::default();
    }

    /// Drop every per-request reference before returning to the pool.
    pub(crate) fn clear(&mut self) {
        self.table = None;
        self.method = None;
        self.path.clear();
        self.route = None;
        self.values.clear();
        self.route_cursor = None;
        self.handler_cursor = 0;
        self.request = Request::default();
        self.response = Response::default();
    }

    /// Take the finished response, leaving an empty one behind.
    pub(crate) fn take_response(&mut self) -> Response {
        std::mem::take(&mut self.response)
    }

    /// Scan forward from the current route cursor and run the first match.
    ///
    /// Falls back to `404 Not Found` when the sequence is exhausted.
    pub(crate) fn scan(&mut self) {
        let (Some(table), Some(method)) = (self.table.clone(), self.method) else {
            self.not_found();
            return;
        };

        let routes = table.routes(method);
        let mut candidate = self.route_cursor.map_or(0, |i| i + 1);

        while let Some(route) = routes.get(candidate) {
            self.route_cursor = Some(candidate);

            if let Some(values) = route.matches(&self.path) {
                tracing::trace!(
                    method = %method,
                    path = %self.path,
                    route = %route.path(),
                    position = candidate,
                    "Route matched"
                );
                let route = Arc::clone(route);
                self.route = Some(Arc::clone(&route));
                self.values = values;
                self.handler_cursor = 0;
                (route.handlers()[0])(self);
                return;
            }

            candidate += 1;
        }

        self.not_found();
    }

    fn not_found(&mut self) {
        tracing::debug!(
            method = %self.request.method(),
            path = %self.path,
            "No route handled request"
        );
        self.status(NOT_FOUND_STATUS).send_string(NOT_FOUND_BODY);
    }

    /// Continue with the next handler of the current route, or, once the
    /// chain is exhausted, with the next route matching this request.
    pub fn next(&mut self) {
        let Some(route) = self.route.clone() else {
            self.scan();
            return;
        };

        self.handler_cursor += 1;
        match route.handlers().get(self.handler_cursor) {
            Some(handler) => handler(self),
            None => self.scan(),
        }
    }

    /// Value of a path parameter of the executing route; empty if unknown.
    pub fn params(&self, name: &str) -> &str {
        let Some(route) = &self.route else {
            return "";
        };
        route
            .param_names()
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values.get(i))
            .map_or("", String::as_str)
    }

    /// Query parameter `name`, or `default` when missing or empty.
    pub fn query<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.request.query(name) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Form value `name` (query first, then a urlencoded body), or `default`.
    pub fn form_value<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.request.form_value(name) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Set the response status code.
    pub fn status(&mut self, code: u16) -> &mut Self {
        self.response.set_status(code);
        self
    }

    /// Append to the response body.
    pub fn write(&mut self, chunk: impl AsRef<[u8]>) -> &mut Self {
        self.response.append(chunk.as_ref());
        self
    }

    /// Append several chunks to the response body, in order.
    pub fn write_all<I>(&mut self, chunks: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for chunk in chunks {
            self.response.append(chunk.as_ref());
        }
        self
    }

    /// Replace the response body.
    pub fn send_string(&mut self, body: impl Into<String>) {
        self.response.replace(body.into().into_bytes());
    }

    /// Request method as received.
    pub fn method(&self) -> &str {
        self.request.method()
    }

    /// Request path with trailing slashes removed (root stays `/`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Registration path of the executing route.
    pub fn route_path(&self) -> Option<&str> {
        self.route.as_deref().map(Route::path)
    }

    /// Status code set so far.
    pub fn response_status(&self) -> u16 {
        self.response.status()
    }
}

/// Strip trailing slashes; the root path stays `/`.
pub fn normalize_request_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
