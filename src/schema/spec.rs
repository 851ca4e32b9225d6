//! Nested section schemas.
//!
//! A [`Spec`] describes a section of a configuration: a set of children,
//! each addressed by a path relative to the section, plus a filter over the
//! whole section that runs only once every child has passed.

use std::sync::Arc;

use indexmap::IndexMap;
use stillwater::Validation;
use tracing::{debug, trace};

use crate::error::{ValidationErrors, ValidationFailure};
use crate::filter::{Filter, FilterResult};
use crate::path::ConfigPath;
use crate::source::{Primitive, PrimitiveKind, Section, Source};
use crate::validation::ValidationResult;
use crate::NodeValidation;

use super::node::fail;
use super::traits::{NodeLike, NodeValidator};

/// A schema for a section with named children.
///
/// Every child is validated exactly once, in the order it was added, and
/// all failures are collected; a failing child never hides a sibling. The
/// section filter runs only when every child passed, and its failure is
/// reported at the spec's own location.
///
/// Child paths are relative to the section and are resolved by the source,
/// so a key such as `"db.port"` reaches into a nested section.
///
/// # Example
///
/// ```rust
/// use cfgspec::{filters, MapSource, Schema};
///
/// let spec = Schema::spec()
///     .add_child("name", Schema::string())
///     .add_child("port", Schema::node(filters::positive::<i32>()));
///
/// let source = MapSource::new().with("name", "svc").with("port", -1);
/// let result = spec.validate(&source);
///
/// assert!(!result.passed());
/// assert!(result.message().contains("port: filter failed"));
/// assert!(!result.message().contains("name:"));
/// ```
pub struct Spec<U> {
    children: IndexMap<String, Arc<dyn NodeValidator>>,
    filter: Filter<Section, U>,
}

impl<U> Clone for Spec<U> {
    fn clone(&self) -> Self {
        Self {
            children: self.children.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl<U: 'static> Spec<U> {
    /// Creates a spec without children whose section filter is `filter`.
    pub fn new(filter: Filter<Section, U>) -> Self {
        Self {
            children: IndexMap::new(),
            filter,
        }
    }

    /// Adds a child at `path`, relative to this section.
    ///
    /// Adding a second child at the same path replaces the first one.
    pub fn add_child<N>(mut self, path: impl Into<String>, node: N) -> Self
    where
        N: NodeLike + 'static,
    {
        self.children.insert(path.into(), Arc::new(node));
        self
    }

    /// Adds several children of the same node type.
    pub fn add_children<K, N, I>(mut self, children: I) -> Self
    where
        K: Into<String>,
        N: NodeLike + 'static,
        I: IntoIterator<Item = (K, N)>,
    {
        for (path, node) in children {
            self.children.insert(path.into(), Arc::new(node));
        }
        self
    }

    /// Returns a spec whose section filter runs `next` afterwards.
    pub fn with_filter<V: 'static>(self, next: Filter<U, V>) -> Spec<V> {
        Spec {
            children: self.children,
            filter: self.filter.then(next),
        }
    }

    /// Returns the relative paths of the children in declaration order.
    pub fn child_paths(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns a filter that validates a section against this spec.
    ///
    /// Failing children are folded into the failure message as
    /// `path: reason` entries, with paths relative to the section. Use it
    /// where only a filter fits; [`List::of_sections`](super::List::of_sections)
    /// keeps each child's full path instead.
    pub fn to_filter(&self) -> Filter<Section, U> {
        let spec = self.clone();
        Filter::new(move |section: Section| {
            let at = ConfigPath::root_with_separator(section.separator());
            match spec.check_section(section, &at) {
                Validation::Success(output) => FilterResult::Pass(output),
                Validation::Failure(errors) => FilterResult::Fail(fold_message(&errors)),
            }
        })
    }

    /// Validates `source` as a whole against this spec.
    pub fn validate(&self, source: &dyn Source) -> ValidationResult {
        self.validate_at(source, "")
    }

    /// Validates the section at `path` of `source` against this spec.
    pub fn validate_at(&self, source: &dyn Source, path: &str) -> ValidationResult {
        self.evaluate_at_path(source, path).into()
    }

    /// Validates `source` and returns the section filter's output.
    pub fn evaluate(&self, source: &dyn Source) -> NodeValidation<U> {
        self.evaluate_at_path(source, "")
    }

    fn evaluate_at_path(&self, source: &dyn Source, path: &str) -> NodeValidation<U> {
        let at = ConfigPath::root_with_separator(source.separator()).push_field(path);
        self.evaluate_at(source, path, &at)
    }

    fn check_children(&self, section: &dyn Source, at: &ConfigPath) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for (relative, child) in &self.children {
            let child_at = at.push_field(relative.as_str());
            trace!(path = %child_at, kind = %child.node_kind(), "checking child");
            if let Validation::Failure(errors) = child.check(section, relative, &child_at) {
                failures.extend(errors);
            }
        }
        debug!(
            path = %at,
            children = self.children.len(),
            failures = failures.len(),
            "section checked"
        );
        failures
    }

    pub(super) fn check_section(&self, section: Section, at: &ConfigPath) -> NodeValidation<U> {
        let failures = self.check_children(section.as_ref(), at);
        if !failures.is_empty() {
            return Validation::Failure(ValidationErrors::from_vec(failures));
        }

        match self.filter.filter(section) {
            FilterResult::Pass(output) => Validation::Success(output),
            FilterResult::Fail(message) => {
                trace!(path = %at, %message, "section filter failed");
                fail(ValidationFailure::filter_failed(at.clone(), message))
            }
        }
    }
}

impl<U: 'static> NodeLike for Spec<U> {
    type Output = U;

    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::Section
    }

    fn evaluate_at(&self, source: &dyn Source, path: &str, at: &ConfigPath) -> NodeValidation<U> {
        if !source.contains_node(path) {
            trace!(path = %at, "section missing");
            return fail(ValidationFailure::missing(at.clone()));
        }

        let section = Section::is_at(source, path)
            .then(|| Section::read_at(source, path))
            .flatten();
        match section {
            Some(section) => self.check_section(section, at),
            None => {
                trace!(path = %at, "node is not a section");
                fail(ValidationFailure::wrong_type(at.clone(), PrimitiveKind::Section))
            }
        }
    }
}

fn fold_message(errors: &ValidationErrors) -> String {
    let entries: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("the following nodes failed validation: {}", entries.join("; "))
}
