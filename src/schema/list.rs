//! Sequence-valued schema positions.

use std::sync::Arc;

use stillwater::Validation;
use tracing::{debug, trace};

use crate::error::{ValidationErrors, ValidationFailure};
use crate::filter::{Filter, FilterResult};
use crate::path::ConfigPath;
use crate::source::{Element, PrimitiveKind, Section, Source};
use crate::validation::ValidationResult;
use crate::NodeValidation;

use super::node::fail;
use super::spec::Spec;
use super::traits::NodeLike;

type ElementCheck<T, U> = Arc<dyn Fn(T, &ConfigPath) -> NodeValidation<U> + Send + Sync>;

/// A schema position holding a list whose elements are of kind `T`.
///
/// Validation runs in two phases. The element filter is applied to every
/// element in order, without stopping at the first failure, and each
/// rejected element is reported at its own index (`nums[1]`). When every
/// element passed, the outputs (in input order) go through the list-level
/// filter exactly once; otherwise the list-level filter is not invoked.
///
/// Lists of sections built with [`List::of_sections`] report the failing
/// children of each element at their full path (`servers[1].host`), and
/// lists of lists built with [`List::of_lists`] do the same for inner
/// elements (`matrix[1][0]`).
///
/// # Example
///
/// ```rust
/// use cfgspec::{identity, Filter, MapSource, Schema};
///
/// let even = Filter::predicate(|v: &i32| v % 2 == 0, |v| format!("{} is not even", v));
/// let list = Schema::list_with(even, identity());
///
/// let source = MapSource::new().with("nums", vec![2, 3, 4]);
/// let result = list.validate(&source, "nums");
///
/// assert!(!result.passed());
/// assert_eq!(result.message().lines().nth(1), Some("  1. nums[1]: filter failed: 3 is not even"));
/// ```
pub struct List<T, U, V> {
    element: Filter<T, U>,
    check: ElementCheck<T, U>,
    filter: Filter<Vec<U>, V>,
}

impl<T, U, V> Clone for List<T, U, V> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            check: Arc::clone(&self.check),
            filter: self.filter.clone(),
        }
    }
}

impl<T: Element, U: 'static, V: 'static> List<T, U, V> {
    /// Creates a list position from an element filter and a list-level filter.
    pub fn new(element: Filter<T, U>, filter: Filter<Vec<U>, V>) -> Self {
        let run = element.clone();
        let check: ElementCheck<T, U> =
            Arc::new(move |value: T, at: &ConfigPath| match run.filter(value) {
                FilterResult::Pass(output) => Validation::Success(output),
                FilterResult::Fail(message) => {
                    fail(ValidationFailure::filter_failed(at.clone(), message))
                }
            });
        Self {
            element,
            check,
            filter,
        }
    }

    /// The kind every element must have.
    pub fn element_kind(&self) -> PrimitiveKind {
        T::KIND
    }

    /// Returns a list whose list-level filter runs `next` afterwards.
    pub fn with_filter<W: 'static>(self, next: Filter<V, W>) -> List<T, U, W> {
        List {
            element: self.element,
            check: self.check,
            filter: self.filter.then(next),
        }
    }

    /// Returns the effective filter: the element filter over every element,
    /// then the list-level filter.
    ///
    /// Element failures are folded into one message, one `[index] message`
    /// line each.
    pub fn to_filter(&self) -> Filter<Vec<T>, V> {
        self.element.clone().for_each().then(self.filter.clone())
    }

    /// Validates the list at `path` of `source`.
    pub fn validate(&self, source: &dyn Source, path: &str) -> ValidationResult {
        self.evaluate(source, path).into()
    }

    /// Validates the list at `path` and returns the list filter's output.
    pub fn evaluate(&self, source: &dyn Source, path: &str) -> NodeValidation<V> {
        let at = ConfigPath::root_with_separator(source.separator()).push_field(path);
        self.evaluate_at(source, path, &at)
    }

    fn check_items(&self, items: Vec<T>, at: &ConfigPath) -> NodeValidation<V> {
        let count = items.len();
        let mut outputs = Vec::with_capacity(count);
        let mut failures = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let item_at = at.push_index(index);
            match (self.check)(item, &item_at) {
                Validation::Success(output) => outputs.push(output),
                Validation::Failure(errors) => {
                    trace!(path = %item_at, failures = errors.len(), "element rejected");
                    failures.extend(errors);
                }
            }
        }
        if !failures.is_empty() {
            debug!(path = %at, elements = count, failures = failures.len(), "list failed");
            return Validation::Failure(ValidationErrors::from_vec(failures));
        }

        match self.filter.filter(outputs) {
            FilterResult::Pass(output) => {
                debug!(path = %at, elements = count, "list passed");
                Validation::Success(output)
            }
            FilterResult::Fail(message) => {
                debug!(path = %at, elements = count, %message, "list filter failed");
                fail(ValidationFailure::filter_failed(at.clone(), message))
            }
        }
    }
}

impl<U: 'static, V: 'static> List<Section, U, V> {
    /// Creates a list whose every element is a section validated by `spec`.
    pub fn of_sections(spec: &Spec<U>, filter: Filter<Vec<U>, V>) -> Self {
        let element = spec.to_filter();
        let spec = spec.clone();
        let check: ElementCheck<Section, U> =
            Arc::new(move |section: Section, at: &ConfigPath| spec.check_section(section, at));
        Self {
            element,
            check,
            filter,
        }
    }
}

impl<E: Element, U: 'static, V: 'static> List<Vec<E>, U, V> {
    /// Creates a list whose every element is a list validated by `inner`.
    pub fn of_lists<X: 'static>(inner: &List<E, X, U>, filter: Filter<Vec<U>, V>) -> Self {
        let element = inner.to_filter();
        let inner = inner.clone();
        let check: ElementCheck<Vec<E>, U> =
            Arc::new(move |items: Vec<E>, at: &ConfigPath| inner.check_items(items, at));
        Self {
            element,
            check,
            filter,
        }
    }
}

impl<T: Element, U: 'static, V: 'static> NodeLike for List<T, U, V> {
    type Output = V;

    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::List
    }

    fn evaluate_at(&self, source: &dyn Source, path: &str, at: &ConfigPath) -> NodeValidation<V> {
        if !source.contains_node(path) {
            debug!(path = %at, "list missing");
            return fail(ValidationFailure::missing(at.clone()));
        }

        let items = source
            .is_list(path, T::KIND)
            .then(|| source.get_list(path, T::KIND))
            .flatten()
            .and_then(|items| items.into_iter().map(T::from_value).collect::<Option<Vec<T>>>());
        let Some(items) = items else {
            debug!(path = %at, element = %T::KIND, "list has wrong type");
            return fail(ValidationFailure::wrong_list_type(at.clone(), T::KIND));
        };

        self.check_items(items, at)
    }
}
