//! Application surface: registration, serving, shutdown and testing.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     App::get / post / ... / use_middleware / group
//!     → RouteTable::register (copy-on-write, frozen once shared)
//!
//! Serving:
//!     App::listen → HttpServer (axum) → Dispatcher → handler chains
//!
//! Testing:
//!     App::test → same router via tower::ServiceExt::oneshot, time-bounded
//! ```
//!
//! # Design Decisions
//! - Registration must finish before serving; a running server keeps the
//!   table snapshot it started with
//! - Groups are prefix helpers over the same table, never nested tables

pub mod group;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request as HttpRequest;
use axum::response::Response as HttpResponse;
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::dispatch::{ContextPool, Dispatcher, IntoChain};
use crate::error::ServerError;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::routing::route::Method;
use crate::routing::table::RouteTable;

pub use group::Group;

/// A routing application.
///
/// ```
/// use tessera::{App, Context};
///
/// let mut app = App::new();
/// app.get("/", |c: &mut Context| {
///     c.status(200).write("Hello, World!");
/// });
///
/// let mut v1 = app.group("/v1", |c: &mut Context| {
///     c.write("Hello ");
///     c.next();
/// });
/// v1.get("/hello/:name", |c: &mut Context| {
///     let name = c.params("name").to_string();
///     c.write(name);
/// });
/// ```
pub struct App {
    table: Arc<RouteTable>,
    pool: Arc<ContextPool>,
    config: ServerConfig,
    shutdown: Shutdown,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an application with default configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            table: Arc::new(RouteTable::new()),
            pool: Arc::new(ContextPool::new(config.pool.max_idle)),
            config,
            shutdown: Shutdown::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Registered routes.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    fn register(&mut self, method: Option<Method>, path: &str, chain: impl IntoChain) {
        Arc::make_mut(&mut self.table).register(method, path, chain.into_chain());
    }

    /// Register a chain for `method` at `path`.
    pub fn add(&mut self, method: Method, path: &str, chain: impl IntoChain) {
        self.register(Some(method), path, chain);
    }

    pub fn get(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Get, path, chain);
    }

    pub fn head(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Head, path, chain);
    }

    pub fn post(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Post, path, chain);
    }

    pub fn put(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Put, path, chain);
    }

    pub fn delete(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Delete, path, chain);
    }

    pub fn patch(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Patch, path, chain);
    }

    pub fn options(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Options, path, chain);
    }

    /// Register middleware for every method and every path.
    pub fn use_middleware(&mut self, chain: impl IntoChain) {
        self.register(None, "", chain);
    }

    /// Open a prefix group.
    ///
    /// A non-empty `chain` is registered as middleware scoped to `prefix`;
    /// with `()` the group only remembers the prefix.
    pub fn group(&mut self, prefix: &str, chain: impl IntoChain) -> Group<'_> {
        let chain = chain.into_chain();
        if !chain.is_empty() {
            self.register(None, prefix, chain);
        }
        Group::new(self, prefix)
    }

    /// A dispatcher over the current route table.
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::new(Dispatcher::new(
            Arc::clone(&self.table),
            Arc::clone(&self.pool),
        ))
    }

    fn http_server(&self) -> HttpServer {
        HttpServer::new(self.config.clone(), self.dispatcher())
    }

    /// Bind `address` and serve until shutdown.
    pub async fn listen(&self, address: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| ServerError::Bind {
                address: address.to_string(),
                source,
            })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl+C or [`App::shutdown`].
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let server = self.http_server();
        let signal = self.shutdown.subscribe();

        self.shutdown.mark_running();
        let result = server.run(listener, signal).await;
        self.shutdown.mark_stopped();

        result.map_err(ServerError::from)
    }

    /// Stop a running server; in-flight requests are drained.
    pub fn shutdown(&self) -> Result<(), ServerError> {
        self.shutdown.trigger()
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Drive one request through the full HTTP stack without a socket.
    ///
    /// Bounded by `timeouts.test_ms`.
    pub async fn test(&self, request: HttpRequest<Body>) -> Result<HttpResponse, ServerError> {
        let limit = Duration::from_millis(self.config.timeouts.test_ms);
        self.test_with_timeout(request, limit).await
    }

    pub async fn test_with_timeout(
        &self,
        request: HttpRequest<Body>,
        limit: Duration,
    ) -> Result<HttpResponse, ServerError> {
        let router = self.http_server().router();
        match tokio::time::timeout(limit, router.oneshot(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(never)) => match never {},
            Err(_) => Err(ServerError::Timeout(limit)),
        }
    }
}
