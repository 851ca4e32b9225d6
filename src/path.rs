//! Absolute locations of configuration nodes.
//!
//! This module provides [`ConfigPath`] and [`PathSegment`], used to report
//! where in a configuration tree a validation failure occurred.

use std::fmt::{self, Display};
use std::sync::Arc;

/// The separator used when no source-specific separator is known.
pub const DEFAULT_SEPARATOR: &str = ".";

/// A segment of a configuration path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A relative key as declared in a spec (may itself contain separators).
    Field(String),
    /// A position inside a list (e.g. `[0]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// The absolute path of a node within the configuration being validated.
///
/// A `ConfigPath` is built while the engine walks a spec tree. A nested spec
/// appends the relative key of its child and a list appends the index of a
/// rejected element. Field segments are joined with the separator of the
/// source that was validated, so the rendered path is the one a caller would
/// use to address the node in that source.
///
/// # Example
///
/// ```rust
/// use cfgspec::ConfigPath;
///
/// let path = ConfigPath::root()
///     .push_field("db")
///     .push_field("replicas")
///     .push_index(1)
///     .push_field("host");
///
/// assert_eq!(path.to_string(), "db.replicas[1].host");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    segments: Vec<PathSegment>,
    separator: Arc<str>,
}

impl Default for ConfigPath {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            separator: Arc::from(DEFAULT_SEPARATOR),
        }
    }
}

impl ConfigPath {
    /// Creates an empty path representing the root of a source.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates an empty path that renders field segments with `separator`.
    pub fn root_with_separator(separator: &str) -> Self {
        Self {
            segments: Vec::new(),
            separator: Arc::from(separator),
        }
    }

    /// Creates a path from a single relative key.
    ///
    /// The empty key denotes the root, so `from_field("")` is the root path.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self::root().push_field(name)
    }

    /// Returns a new path with a field segment appended.
    ///
    /// Appending the empty key returns an unchanged copy: the empty path
    /// addresses the section itself.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut segments = self.segments.clone();
        if !name.is_empty() {
            segments.push(PathSegment::Field(name));
        }
        Self {
            segments,
            separator: Arc::clone(&self.separator),
        }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self {
            segments,
            separator: Arc::clone(&self.separator),
        }
    }

    /// Returns the separator used to join field segments.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, "{}", self.separator)?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = ConfigPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_empty_field_is_root() {
        assert!(ConfigPath::from_field("").is_root());
        let base = ConfigPath::from_field("server");
        assert_eq!(base.push_field(""), base);
    }

    #[test]
    fn test_nested_fields() {
        let path = ConfigPath::root().push_field("server").push_field("port");
        assert_eq!(path.to_string(), "server.port");
    }

    #[test]
    fn test_field_with_index() {
        let path = ConfigPath::root().push_field("hosts").push_index(2);
        assert_eq!(path.to_string(), "hosts[2]");
    }

    #[test]
    fn test_custom_separator() {
        let path = ConfigPath::root_with_separator("/")
            .push_field("a")
            .push_field("b")
            .push_index(0)
            .push_field("c");
        assert_eq!(path.to_string(), "a/b[0]/c");
        assert_eq!(path.separator(), "/");
    }

    #[test]
    fn test_relative_key_with_separator_is_one_segment() {
        let path = ConfigPath::root().push_field("nested.list");
        assert_eq!(path.len(), 1);
        assert_eq!(path.to_string(), "nested.list");
    }

    #[test]
    fn test_path_immutability() {
        let base = ConfigPath::root().push_field("hosts");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "hosts");
        assert_eq!(path_a.to_string(), "hosts[0]");
        assert_eq!(path_b.to_string(), "hosts[1]");
    }
}
