//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (method | USE, path, handlers)
//!     → table.rs (normalise path, append to method sequences)
//!     → route.rs (build Route)
//!     → pattern.rs (compile path into segments)
//!
//! Request time:
//!     normalised path
//!     → route.rs (root / middleware prefix rules)
//!     → matcher.rs (segment walk, parameter extraction)
//!     → Return: parameter values or no match
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at registration, immutable at runtime
//! - No regex, no wildcards: one linear pass per candidate
//! - Deterministic: same input always matches same route
//! - First registered match wins

pub mod matcher;
pub mod pattern;
pub mod route;
pub mod table;

pub use pattern::{PathPattern, Segment};
pub use route::{Method, Route, UnknownMethod};
pub use table::RouteTable;
