//! Route groups with a common prefix.

use crate::app::App;
use crate::dispatch::IntoChain;
use crate::routing::route::Method;

/// A path prefix bound to the application that owns the routes.
///
/// Groups hold no routes of their own; every registration goes straight to
/// the application's table with the prefix prepended.
pub struct Group<'a> {
    app: &'a mut App,
    prefix: String,
}

impl<'a> Group<'a> {
    pub(crate) fn new(app: &'a mut App, prefix: &str) -> Self {
        Self {
            app,
            prefix: prefix.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Open a nested group; see [`App::group`].
    pub fn group(&mut self, prefix: &str, chain: impl IntoChain) -> Group<'_> {
        let full = join_group_path(&self.prefix, prefix);
        self.app.group(&full, chain)
    }

    pub fn add(&mut self, method: Method, path: &str, chain: impl IntoChain) {
        let full = join_group_path(&self.prefix, path);
        self.app.add(method, &full, chain);
    }

    pub fn get(&mut self, path: &str, chain: impl IntoChain) {
        self.add(Method::Get, path, chain);
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
}

/// Append `path` to `prefix`; a bare `/` leaves the prefix unchanged.
pub fn join_group_path(prefix: &str, path: &str) -> String {
    if path == "/" {
        return prefix.to_string();
    }
    format!("{}{}", prefix.trim_end_matches('/'), path)
}
