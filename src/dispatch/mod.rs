//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Transport request (method, path, query, form)
//!     → pool.rs (acquire + reset Context)
//!     → context.rs scan (route table from the cursor, first match)
//!     → handler chain (handlers call next() to continue)
//!         → next handler of the same route, or
//!         → resume scan for the next matching route, or
//!         → 404 Not Found once the table is exhausted
//!     → response taken from the Context
//!     → pool.rs (clear + release Context)
//! ```
//!
//! # Design Decisions
//! - Synchronous: no suspension points between acquire and release
//! - Order is fixed by registration order and handler order
//! - Routing misses are never errors, they end in 404

pub mod context;
pub mod handler;
pub mod pool;

use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::table::RouteTable;

pub use context::Context;
pub use handler::{handler, Handler, IntoChain};
pub use pool::ContextPool;

/// Runs requests against a frozen route table.
pub struct Dispatcher {
    table: Arc<RouteTable>,
    pool: Arc<ContextPool>,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>, pool: Arc<ContextPool>) -> Self {
        Self { table, pool }
    }

    /// Dispatch one request and return its response.
    ///
    /// The transport must call this exactly once per request.
    pub fn dispatch(&self, request: Request) -> Response {
        let mut ctx = self.pool.acquire(Arc::clone(&self.table), request);
        ctx.scan();
        let response = ctx.take_response();
        self.pool.release(ctx);
        response
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn pool(&self) -> &ContextPool {
        &self.pool
    }
}
