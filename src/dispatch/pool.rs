//! Context reuse across requests.
//!
//! # Responsibilities
//! - Hand out a reset `Context` for each request
//! - Take contexts back once the response has been produced
//! - Bound the number of idle contexts kept around
//!
//! # Design Decisions
//! - A mutex-guarded free list; the critical section is a push or a pop
//! - Contexts are reset on acquire and cleared on release
//! - A context that is never released (handler panic) is simply dropped

use std::sync::{Arc, Mutex, PoisonError};

use crate::dispatch::context::Context;
use crate::http::request::Request;
use crate::observability::metrics;
use crate::routing::table::RouteTable;

/// Free list of request contexts.
pub struct ContextPool {
    idle: Mutex<Vec<Context>>,
    max_idle: usize,
}

impl ContextPool {
    /// Create a pool keeping at most `max_idle` contexts between requests.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take a context and bind it to `request`.
    pub fn acquire(&self, table: Arc<RouteTable>, request: Request) -> Context {
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();

        let mut ctx = reused.unwrap_or_default();
        ctx.reset(table, request);
        ctx
    }

    /// Clear `ctx` and keep it for a later request if there is room.
    pub fn release(&self, mut ctx: Context) {
        ctx.clear();

        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.max_idle {
            idle.push(ctx);
        }
        metrics::record_pool_idle(idle.len());
    }

    /// Number of contexts currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn max_idle(&self) -> usize {
        self.max_idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::handler::handler;
    use crate::routing::route::Method;

    fn table() -> Arc<RouteTable> {
        let mut table = RouteTable::new();
        table.register(
            Some(Method::Get),
            "/user/:name",
            vec![handler(|c| {
                let name = c.params("name").to_string();
                c.write(name);
            })],
        );
        Arc::new(table)
    }

    #[test]
    fn test_release_then_acquire_reuses_context() {
        let pool = ContextPool::new(4);
        let table = table();

        let mut ctx = pool.acquire(Arc::clone(&table), Request::new("GET", "/user/john"));
        ctx.scan();
        assert_eq!(ctx.params("name"), "john");
        pool.release(ctx);
        assert_eq!(pool.idle(), 1);

        let ctx = pool.acquire(Arc::clone(&table), Request::new("GET", "/other"));
        assert_eq!(pool.idle(), 0);
        assert_eq!(ctx.params("name"), "");
        assert_eq!(ctx.path(), "/other");
        assert_eq!(ctx.response_status(), 200);
    }

    #[test]
    fn test_idle_contexts_are_bounded() {
        let pool = ContextPool::new(1);
        let table = table();

        let a = pool.acquire(Arc::clone(&table), Request::new("GET", "/"));
        let b = pool.acquire(Arc::clone(&table), Request::new("GET", "/"));
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.max_idle(), 1);
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = Arc::new(ContextPool::new(8));
        let table = table();

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let pool = Arc::clone(&pool);
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let path = format!("/user/{i}");
                        let mut ctx = pool.acquire(Arc::clone(&table), Request::new("GET", &path));
                        ctx.scan();
                        assert_eq!(ctx.params("name"), i.to_string());
                        let body = ctx.take_response();
                        assert_eq!(body.body(), i.to_string().as_bytes());
                        pool.release(ctx);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().expect("worker panicked");
        }
        assert!(pool.idle() <= 8);
    }
}
