//! Validation failure types.
//!
//! This module provides [`ValidationFailure`] for a single failing node and
//! [`ValidationErrors`] for accumulating every failure of one validation run.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::ConfigPath;
use crate::source::PrimitiveKind;

/// Why a node failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// Nothing is stored at the node's path.
    Missing,
    /// A value exists but does not have the declared shape.
    ///
    /// `element` is set for list positions and names the declared element
    /// kind; `expected` is then [`PrimitiveKind::List`].
    WrongType {
        expected: PrimitiveKind,
        element: Option<PrimitiveKind>,
    },
    /// The value has the right shape but the node's filter rejected it.
    FilterFailed { message: String },
}

impl FailureReason {
    /// Returns the machine-readable code of this reason.
    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::Missing => "missing",
            FailureReason::WrongType { .. } => "wrong_type",
            FailureReason::FilterFailed { .. } => "filter_failed",
        }
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Missing => {
                write!(f, "missing: the node is not contained in the config")
            }
            FailureReason::WrongType {
                element: Some(element),
                ..
            } => write!(f, "wrong type: the node is not a list of type {}", element),
            FailureReason::WrongType {
                expected,
                element: None,
            } => write!(f, "wrong type: the node is not of type {}", expected),
            FailureReason::FilterFailed { message } => write!(f, "filter failed: {}", message),
        }
    }
}

/// A single failing node with its absolute location.
///
/// # Example
///
/// ```rust
/// use cfgspec::{ConfigPath, FailureReason, ValidationFailure};
///
/// let failure = ValidationFailure::new(ConfigPath::from_field("port"), FailureReason::Missing);
///
/// assert_eq!(failure.code(), "missing");
/// assert_eq!(
///     failure.to_string(),
///     "port: missing: the node is not contained in the config"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// The absolute path of the failing node.
    pub path: ConfigPath,
    /// What went wrong.
    pub reason: FailureReason,
}

impl ValidationFailure {
    pub fn new(path: ConfigPath, reason: FailureReason) -> Self {
        Self { path, reason }
    }

    pub fn missing(path: ConfigPath) -> Self {
        Self::new(path, FailureReason::Missing)
    }

    pub fn wrong_type(path: ConfigPath, expected: PrimitiveKind) -> Self {
        Self::new(
            path,
            FailureReason::WrongType {
                expected,
                element: None,
            },
        )
    }

    pub fn wrong_list_type(path: ConfigPath, element: PrimitiveKind) -> Self {
        Self::new(
            path,
            FailureReason::WrongType {
                expected: PrimitiveKind::List,
                element: Some(element),
            },
        )
    }

    pub fn filter_failed(path: ConfigPath, message: impl Into<String>) -> Self {
        Self::new(
            path,
            FailureReason::FilterFailed {
                message: message.into(),
            },
        )
    }

    /// Returns the machine-readable code of the reason.
    pub fn code(&self) -> &'static str {
        self.reason.code()
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

impl std::error::Error for ValidationFailure {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationFailure>();
    assert_sync::<ValidationFailure>();
};

/// A non-empty collection of validation failures.
///
/// `ValidationErrors` implements `Semigroup`, so the failures of sibling
/// nodes combine in the order the nodes were declared:
///
/// ```rust
/// use cfgspec::{ConfigPath, ValidationErrors, ValidationFailure};
/// use stillwater::prelude::*;
///
/// let name = ValidationErrors::single(ValidationFailure::missing(ConfigPath::from_field("name")));
/// let port = ValidationErrors::single(ValidationFailure::filter_failed(
///     ConfigPath::from_field("port"),
///     "must be positive",
/// ));
///
/// let combined = name.combine(port);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().path.to_string(), "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationFailure>);

impl ValidationErrors {
    /// Creates a collection containing a single failure.
    pub fn single(failure: ValidationFailure) -> Self {
        Self(NonEmptyVec::singleton(failure))
    }

    /// Creates a collection from a vec of failures.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty.
    pub fn from_vec(failures: Vec<ValidationFailure>) -> Self {
        match NonEmptyVec::from_vec(failures) {
            Some(failures) => Self(failures),
            None => panic!("ValidationErrors requires at least one failure"),
        }
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.0.iter()
    }

    /// Returns the first failure.
    pub fn first(&self) -> &ValidationFailure {
        self.0.head()
    }

    pub fn into_vec(self) -> Vec<ValidationFailure> {
        self.0.into_vec()
    }

    /// Returns all failures whose rendered path equals `path`.
    pub fn at_path(&self, path: &str) -> Vec<&ValidationFailure> {
        self.0
            .iter()
            .filter(|f| f.path.to_string() == path)
            .collect()
    }

    /// Returns all failures with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationFailure> {
        self.0.iter().filter(|f| f.code() == code).collect()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, failure) in self.iter().enumerate() {
            let marker = format!("  {}. ", i + 1);
            // Continuation lines of a multi-line message line up under the entry.
            let continuation = format!("\n{}", " ".repeat(marker.len()));
            let entry = failure.to_string().replace('\n', &continuation);
            writeln!(f, "{}{}", marker, entry)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationFailure;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationFailure> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn at(path: &str) -> ConfigPath {
        ConfigPath::from_field(path)
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(FailureReason::Missing.code(), "missing");
        assert_eq!(
            ValidationFailure::wrong_type(at("a"), PrimitiveKind::Integer).code(),
            "wrong_type"
        );
        assert_eq!(
            ValidationFailure::filter_failed(at("a"), "nope").code(),
            "filter_failed"
        );
    }

    #[test]
    fn test_wrong_type_display() {
        let scalar = ValidationFailure::wrong_type(at("port"), PrimitiveKind::Integer);
        assert_eq!(
            scalar.to_string(),
            "port: wrong type: the node is not of type integer"
        );

        let list = ValidationFailure::wrong_list_type(at("hosts"), PrimitiveKind::String);
        assert_eq!(
            list.to_string(),
            "hosts: wrong type: the node is not a list of type string"
        );
    }

    #[test]
    fn test_root_display() {
        let failure = ValidationFailure::filter_failed(ConfigPath::root(), "bad section");
        assert_eq!(failure.to_string(), "(root): filter failed: bad section");
    }

    #[test]
    fn test_errors_single() {
        let failure = ValidationFailure::missing(at("a"));
        let errors = ValidationErrors::single(failure.clone());

        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());
        assert_eq!(errors.first(), &failure);
    }

    #[test]
    fn test_errors_combine_preserves_order() {
        let errors = ValidationErrors::single(ValidationFailure::missing(at("a")))
            .combine(ValidationErrors::single(ValidationFailure::missing(at("b"))))
            .combine(ValidationErrors::single(ValidationFailure::missing(at("c"))));

        let paths: Vec<String> = errors.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_errors_at_path_and_with_code() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationFailure::missing(at("a")),
            ValidationFailure::filter_failed(at("a"), "x"),
            ValidationFailure::missing(at("b")),
        ]);

        assert_eq!(errors.at_path("a").len(), 2);
        assert_eq!(errors.at_path("b").len(), 1);
        assert_eq!(errors.with_code("missing").len(), 2);
        assert_eq!(errors.with_code("wrong_type").len(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one failure")]
    fn test_from_empty_vec_panics() {
        let _ = ValidationErrors::from_vec(Vec::new());
    }

    #[test]
    fn test_errors_display() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationFailure::filter_failed(at("port"), "must be positive, got -1"),
            ValidationFailure::missing(ConfigPath::root().push_field("db").push_field("host")),
        ]);

        assert_eq!(
            errors.to_string(),
            "Validation failed with 2 error(s):\n  \
             1. port: filter failed: must be positive, got -1\n  \
             2. db.host: missing: the node is not contained in the config\n"
        );
    }

    #[test]
    fn test_errors_display_indents_multiline_messages() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationFailure::filter_failed(at("nums"), "bad elements:\n[0] 1\n[2] 3"),
            ValidationFailure::missing(at("name")),
        ]);
        assert_eq!(
            errors.to_string(),
            "Validation failed with 2 error(s):\n  \
             1. nums: filter failed: bad elements:\n     \
             [0] 1\n     \
             [2] 3\n  \
             2. name: missing: the node is not contained in the config\n"
        );
    }

    #[test]
    fn test_errors_into_iter() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationFailure::missing(at("a")),
            ValidationFailure::missing(at("b")),
        ]);

        let borrowed: Vec<&ValidationFailure> = (&errors).into_iter().collect();
        assert_eq!(borrowed.len(), 2);

        let owned: Vec<ValidationFailure> = errors.into_iter().collect();
        assert_eq!(owned.len(), 2);
    }
}
