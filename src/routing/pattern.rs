//! Route pattern compilation.
//!
//! # Responsibilities
//! - Split a registration path into literal and parameter segments
//! - Merge runs of literal tokens into a single segment
//! - Record parameter names in positional order
//!
//! # Design Decisions
//! - Compilation never fails: malformed parameter syntax is kept literally
//! - The final segment is the only one allowed to keep a trailing separator
//!   in the remaining input (see `matcher.rs`)
//! - Root (`/`) compiles to a single empty literal

/// One unit of a compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that must appear verbatim. May contain `/` after merging.
    Literal(String),
    /// A named chunk running up to the next `/`.
    Param {
        name: String,
        optional: bool,
    },
}

impl Segment {
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param { .. })
    }
}

/// Compiled form of a registration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compile a path such as `/users/:id/posts/:post?`.
    ///
    /// ```
    /// use tessera::routing::{PathPattern, Segment};
    ///
    /// let pattern = PathPattern::compile("/api/v1/:id");
    /// assert_eq!(pattern.segments()[0], Segment::Literal("api/v1".into()));
    /// assert_eq!(pattern.param_names(), ["id"]);
    /// ```
    pub fn compile(path: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut param_names = Vec::new();

        let body = path.strip_prefix('/').unwrap_or(path);
        for token in body.split('/').filter(|t| !t.is_empty()) {
            if let Some(name) = token.strip_prefix(':') {
                let (name, optional) = match name.strip_suffix('?') {
                    Some(stripped) => (stripped, true),
                    None => (name, false),
                };
                param_names.push(name.to_string());
                segments.push(Segment::Param {
                    name: name.to_string(),
                    optional,
                });
                continue;
            }

            match segments.last_mut() {
                Some(Segment::Literal(text)) => {
                    text.push('/');
                    text.push_str(token);
                }
                _ => segments.push(Segment::Literal(token.to_string())),
            }
        }

        if segments.is_empty() {
            segments.push(Segment::Literal(String::new()));
        }

        Self {
            raw: path.to_string(),
            segments,
            param_names,
        }
    }

    /// The path this pattern was compiled from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Compiled segments; the last entry is the terminal segment.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names, aligned with the values produced by `match_path`.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn has_params(&self) -> bool {
        !self.param_names.is_empty()
    }
}
