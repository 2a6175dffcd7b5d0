//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (App::listen):
//!     Bind listener → mark running → serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl+C or App::shutdown → stop accepting → drain in-flight → mark stopped
//! ```
//!
//! # Design Decisions
//! - Bind failure is fatal and reported to the caller
//! - Shutdown before start is a recoverable error, not a panic

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
