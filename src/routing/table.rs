//! Per-method route sequences.
//!
//! # Responsibilities
//! - Normalise registration paths
//! - Append method routes to their own sequence
//! - Append middleware routes to every sequence at registration time
//!
//! # Design Decisions
//! - Registration order is execution order; there is no priority scoring
//! - Middleware shares one `Arc<Route>` across all method sequences
//! - The table is written during setup and read-only while serving

use std::sync::Arc;

use crate::dispatch::handler::Handler;
use crate::routing::route::{Method, Route};

/// Ordered routes for each method, indexed by `Method::index`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    stacks: [Vec<Arc<Route>>; Method::COUNT],
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler chain.
    ///
    /// `method == None` registers middleware on every method.
    pub fn register(&mut self, method: Option<Method>, path: &str, handlers: Vec<Handler>) {
        if handlers.is_empty() {
            tracing::warn!(
                method = method.map_or("USE", Method::as_str),
                path = %path,
                "Ignoring registration without handlers"
            );
            return;
        }

        let path = normalize_path(path);
        let route = Arc::new(Route::new(method, &path, handlers));

        tracing::debug!(
            method = method.map_or("USE", Method::as_str),
            path = %path,
            handlers = route.handlers().len(),
            "Route registered"
        );

        match method {
            Some(method) => self.stacks[method.index()].push(route),
            None => {
                for stack in &mut self.stacks {
                    stack.push(Arc::clone(&route));
                }
            }
        }
    }

    /// Routes for `method`, in registration order.
    pub fn routes(&self, method: Method) -> &[Arc<Route>] {
        &self.stacks[method.index()]
    }

    /// Total number of entries across all methods.
    pub fn len(&self) -> usize {
        self.stacks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.iter().all(Vec::is_empty)
    }
}

/// Ensure a registration path starts with `/`; empty becomes root.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
