//! Errors surfaced to the embedding application.
//!
//! Routing itself never fails: a miss is answered with 404. Only
//! infrastructure conditions end up here.

use std::time::Duration;

use thiserror::Error;

use crate::config::loader::ConfigError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound. Fatal at startup.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Shutdown was requested while no server was running.
    #[error("server is not running")]
    NotRunning,

    /// A test request did not complete in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Serving failed after the listener was bound.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
