//! Leaf schema positions.

use stillwater::Validation;
use tracing::trace;

use crate::error::{ValidationErrors, ValidationFailure};
use crate::filter::{Filter, FilterResult};
use crate::path::ConfigPath;
use crate::source::{Primitive, PrimitiveKind, Source};
use crate::validation::ValidationResult;
use crate::NodeValidation;

use super::traits::NodeLike;

/// A single schema position holding one value of kind `T`.
///
/// The value is read with `T`'s accessor pair and handed to the node's
/// filter. Nodes are immutable and can validate any number of sources.
///
/// # Example
///
/// ```rust
/// use cfgspec::{filters, MapSource, Schema};
///
/// let port = Schema::node(filters::range(1, 65535));
/// let source = MapSource::new().with("port", 8080).with("name", "svc");
///
/// assert!(port.validate(&source, "port").passed());
/// assert!(!port.validate(&source, "name").passed());
/// assert!(!port.validate(&source, "host").passed());
/// ```
pub struct Node<T, U> {
    filter: Filter<T, U>,
}

impl<T, U> Clone for Node<T, U> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
        }
    }
}

impl<T: Primitive, U: 'static> Node<T, U> {
    /// Creates a node running `filter` on the value read at its path.
    pub fn new(filter: Filter<T, U>) -> Self {
        Self { filter }
    }

    pub fn kind(&self) -> PrimitiveKind {
        T::KIND
    }

    pub fn filter(&self) -> &Filter<T, U> {
        &self.filter
    }

    /// Returns a node whose filter runs `next` after this node's filter.
    pub fn with_filter<V: 'static>(self, next: Filter<U, V>) -> Node<T, V> {
        Node::new(self.filter.then(next))
    }

    /// Validates the value at `path` of `source`.
    pub fn validate(&self, source: &dyn Source, path: &str) -> ValidationResult {
        self.evaluate(source, path).into()
    }

    /// Validates the value at `path` and returns the filter output.
    pub fn evaluate(&self, source: &dyn Source, path: &str) -> NodeValidation<U> {
        let at = ConfigPath::root_with_separator(source.separator()).push_field(path);
        self.evaluate_at(source, path, &at)
    }
}

impl<T: Primitive, U: 'static> NodeLike for Node<T, U> {
    type Output = U;

    fn kind(&self) -> PrimitiveKind {
        T::KIND
    }

    fn evaluate_at(&self, source: &dyn Source, path: &str, at: &ConfigPath) -> NodeValidation<U> {
        if !source.contains_node(path) {
            trace!(path = %at, kind = %T::KIND, "node missing");
            return fail(ValidationFailure::missing(at.clone()));
        }

        let read = T::is_at(source, path)
            .then(|| T::read_at(source, path))
            .flatten();
        let value = match read {
            Some(value) => value,
            None => {
                trace!(path = %at, kind = %T::KIND, "node has wrong type");
                return fail(ValidationFailure::wrong_type(at.clone(), T::KIND));
            }
        };

        match self.filter.filter(value) {
            FilterResult::Pass(output) => Validation::Success(output),
            FilterResult::Fail(message) => {
                trace!(path = %at, %message, "node filter failed");
                fail(ValidationFailure::filter_failed(at.clone(), message))
            }
        }
    }
}

pub(crate) fn fail<T>(failure: ValidationFailure) -> NodeValidation<T> {
    Validation::Failure(ValidationErrors::single(failure))
}
