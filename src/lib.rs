//! Tessera: a small HTTP routing and middleware-dispatch layer.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (axum, request id, trace, timeout)
//!                          │
//!                          ▼
//!                     dispatch::Dispatcher ──── acquire ──▶ ContextPool
//!                          │
//!                          ▼
//!                     Context::scan ──────────▶ RouteTable[method]
//!                          │                        │ Route::matches
//!                          ▼                        ▼ (routing::matcher)
//!                     handler chain ◀── next() ──┘
//!                          │
//!     Client Response      ▼
//!     ◀────────────── http::response ◀── release ── ContextPool
//! ```
//!
//! Routes are registered through [`App`] (or a prefix [`Group`]) before the
//! server starts. At request time the method's route sequence is scanned in
//! registration order; the first match runs its handler chain, and handlers
//! pass control along with [`Context::next`]. Middleware registered with
//! [`App::use_middleware`] or a handler-bearing group matches by prefix and
//! falls through to later routes when its chain calls `next()` past the end.

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use app::{App, Group};
pub use config::ServerConfig;
pub use dispatch::{handler, Context, Handler, IntoChain};
pub use error::ServerError;
pub use routing::{Method, PathPattern, Segment};
