//! Path matching against compiled patterns.
//!
//! # Responsibilities
//! - Walk a request path segment by segment
//! - Extract parameter values in positional order
//! - Support exact and prefix (partial) matching
//!
//! # Design Decisions
//! - A miss is `None`, never an error; the dispatcher keeps scanning
//! - Literals must end on a `/` or end of input, so `/ab` never matches `/abc`
//! - Unmet optional parameters yield an empty string
//! - No regex: one left-to-right pass over the path

use crate::routing::pattern::{PathPattern, Segment};

impl PathPattern {
    /// Match `path` against this pattern.
    ///
    /// With `partial` set, input left over after the last segment is ignored,
    /// which is how middleware and groups scope themselves to a prefix.
    ///
    /// ```
    /// use tessera::routing::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/hello/:name");
    /// assert_eq!(pattern.match_path("/hello/john", false), Some(vec!["john".to_string()]));
    /// assert_eq!(pattern.match_path("/hello/john/extra", false), None);
    /// assert!(pattern.match_path("/hello/john/extra", true).is_some());
    /// ```
    pub fn match_path(&self, path: &str, partial: bool) -> Option<Vec<String>> {
        let mut rest = path.strip_prefix('/').unwrap_or(path);
        let mut values = Vec::with_capacity(self.param_names().len());
        let last = self.segments().len().saturating_sub(1);

        for (index, segment) in self.segments().iter().enumerate() {
            let consumed = match segment {
                Segment::Param { .. } => {
                    let end = rest.find('/').unwrap_or(rest.len());
                    values.push(rest[..end].to_string());
                    end
                }
                Segment::Literal(text) => {
                    let len = text.len();
                    if rest.len() < len || (len == 0 && !rest.is_empty()) {
                        return None;
                    }
                    if !rest.starts_with(text.as_str()) {
                        return None;
                    }
                    if rest.len() > len && rest.as_bytes()[len] != b'/' {
                        return None;
                    }
                    len
                }
            };

            if !rest.is_empty() {
                // Step over the separator unless this is the terminal segment.
                let skip = if index != last && rest.len() > consumed {
                    consumed + 1
                } else {
                    consumed
                };
                rest = &rest[skip..];
            }
        }

        if !rest.is_empty() && !partial {
            return None;
        }

        Some(values)
    }
}
