//! Composable value filters.
//!
//! A [`Filter`] is a pure function from an input to a [`FilterResult`]: it
//! either passes with a (possibly transformed) value or fails with a message.
//! Filters compose with [`then`](Filter::then), which stops at the first
//! failing stage, and are what every schema node runs once a value of the
//! declared kind has been read.
//!
//! # Example
//!
//! ```rust
//! use cfgspec::{filters, Filter, FilterResult};
//!
//! let port: Filter<i32, u16> = filters::range(1, 65535)
//!     .map(|p| p as u16);
//!
//! assert_eq!(port.filter(8080), FilterResult::ok(8080));
//! assert!(port.filter(0).failed());
//! ```

pub mod builtin;
mod capture;

use std::fmt::{self, Display};
use std::sync::Arc;

use tracing::trace;

pub use capture::Capture;

const LIST_FAILURE_HEADER: &str = "One or more filters failed while being applied to a list:";

/// The outcome of applying a filter: a value or a failure message.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult<T> {
    Pass(T),
    Fail(String),
}

impl<T> FilterResult<T> {
    /// Creates a passing result.
    pub fn ok(value: T) -> Self {
        FilterResult::Pass(value)
    }

    /// Creates a failing result.
    pub fn fail(message: impl Into<String>) -> Self {
        FilterResult::Fail(message.into())
    }

    pub fn passed(&self) -> bool {
        matches!(self, FilterResult::Pass(_))
    }

    pub fn failed(&self) -> bool {
        !self.passed()
    }

    /// Returns the value of a passing result.
    ///
    /// # Panics
    ///
    /// Panics if the result failed.
    pub fn value(self) -> T {
        match self {
            FilterResult::Pass(value) => value,
            FilterResult::Fail(message) => {
                panic!("cannot take the value of a failed filter result: {}", message)
            }
        }
    }

    /// Returns the message of a failing result.
    ///
    /// # Panics
    ///
    /// Panics if the result passed.
    pub fn message(&self) -> &str {
        match self {
            FilterResult::Pass(_) => panic!("cannot take the message of a passed filter result"),
            FilterResult::Fail(message) => message,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            FilterResult::Pass(value) => Some(value),
            FilterResult::Fail(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            FilterResult::Pass(value) => Ok(value),
            FilterResult::Fail(message) => Err(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FilterResult<U> {
        match self {
            FilterResult::Pass(value) => FilterResult::Pass(f(value)),
            FilterResult::Fail(message) => FilterResult::Fail(message),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> FilterResult<U>) -> FilterResult<U> {
        match self {
            FilterResult::Pass(value) => f(value),
            FilterResult::Fail(message) => FilterResult::Fail(message),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for FilterResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FilterResult::Pass(value),
            Err(err) => FilterResult::Fail(err.to_string()),
        }
    }
}

type FilterFn<T, U> = dyn Fn(T) -> FilterResult<U> + Send + Sync;

/// A shareable function from `T` to [`FilterResult<U>`].
///
/// Filters hold no state of their own and cloning one is cheap. Stateful
/// observers attached with [`tap`](Filter::tap) or [`capture`](Filter::capture)
/// must synchronise themselves, as [`Capture`] does.
pub struct Filter<T, U> {
    func: Arc<FilterFn<T, U>>,
}

impl<T, U> Clone for Filter<T, U> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<T, U> fmt::Debug for Filter<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").finish_non_exhaustive()
    }
}

impl<T: 'static, U: 'static> Filter<T, U> {
    /// Wraps a function as a filter.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(T) -> FilterResult<U> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Applies this filter to `input`.
    pub fn filter(&self, input: T) -> FilterResult<U> {
        (self.func)(input)
    }

    /// Runs `next` on the output of this filter.
    ///
    /// When this filter fails, `next` is not invoked and the failure message
    /// is this filter's.
    pub fn then<V: 'static>(self, next: Filter<U, V>) -> Filter<T, V> {
        Filter::new(move |input| self.filter(input).and_then(|value| next.filter(value)))
    }

    /// Transforms the output of a passing result.
    pub fn map<V: 'static>(self, f: impl Fn(U) -> V + Send + Sync + 'static) -> Filter<T, V> {
        Filter::new(move |input| self.filter(input).map(&f))
    }

    /// Calls `observer` with every value this filter passes.
    ///
    /// The result is returned unchanged.
    pub fn tap(self, observer: impl Fn(&U) + Send + Sync + 'static) -> Self {
        Filter::new(move |input| {
            let result = self.filter(input);
            if let FilterResult::Pass(value) = &result {
                observer(value);
            }
            result
        })
    }

    /// Replaces the failure message of this filter.
    pub fn error(self, message: impl Into<String>) -> Self {
        let message = message.into();
        Filter::new(move |input| match self.filter(input) {
            FilterResult::Fail(_) => FilterResult::Fail(message.clone()),
            pass => pass,
        })
    }

    /// Stores every value this filter passes into `slot`.
    ///
    /// ```rust
    /// use cfgspec::{filters, Capture};
    ///
    /// let seen = Capture::new();
    /// let filter = filters::positive::<i32>().capture(&seen);
    ///
    /// assert!(filter.filter(3).passed());
    /// assert_eq!(seen.get(), Some(3));
    /// ```
    pub fn capture(self, slot: &Capture<U>) -> Self
    where
        U: Clone + Send,
    {
        let slot = slot.clone();
        self.tap(move |value| slot.set(value.clone()))
    }

    /// Lifts this filter to one over sequences.
    ///
    /// Every element is filtered in order, without stopping at the first
    /// failure. The lifted filter passes with the outputs in input order when
    /// every element passed. Otherwise it fails with a message listing each
    /// failing element as `[index] message`, one per line.
    pub fn for_each(self) -> Filter<Vec<T>, Vec<U>> {
        Filter::new(move |items: Vec<T>| {
            let mut outputs = Vec::with_capacity(items.len());
            let mut failures = Vec::new();
            for (index, item) in items.into_iter().enumerate() {
                match self.filter(item) {
                    FilterResult::Pass(value) => outputs.push(value),
                    FilterResult::Fail(message) => {
                        trace!(index, %message, "list element rejected");
                        failures.push(format!("[{}] {}", index, message));
                    }
                }
            }
            if failures.is_empty() {
                FilterResult::Pass(outputs)
            } else {
                FilterResult::Fail(format!("{}\n{}", LIST_FAILURE_HEADER, failures.join("\n")))
            }
        })
    }
}

impl<T: 'static> Filter<T, T> {
    /// Passes values for which `check` holds and fails the rest with the
    /// message built by `message`.
    pub fn predicate<C, M>(check: C, message: M) -> Self
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        M: Fn(&T) -> String + Send + Sync + 'static,
    {
        Filter::new(move |value| {
            if check(&value) {
                FilterResult::Pass(value)
            } else {
                FilterResult::Fail(message(&value))
            }
        })
    }

    /// An identity filter that calls `observer` with every input.
    pub fn run(observer: impl Fn(&T) + Send + Sync + 'static) -> Self {
        identity().tap(observer)
    }
}

/// A filter that passes every input unchanged.
pub fn identity<T: 'static>() -> Filter<T, T> {
    Filter::new(FilterResult::Pass)
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Filter<String, i64>>();
    assert_sync::<Filter<String, i64>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn even() -> Filter<i32, i32> {
        Filter::predicate(|v: &i32| v % 2 == 0, |v| format!("{} is not even", v))
    }

    #[test]
    fn test_result_accessors() {
        let pass = FilterResult::ok(5);
        assert!(pass.passed());
        assert!(!pass.failed());
        assert_eq!(pass.clone().into_option(), Some(5));
        assert_eq!(pass.value(), 5);

        let fail: FilterResult<i32> = FilterResult::fail("bad");
        assert!(fail.failed());
        assert_eq!(fail.message(), "bad");
        assert_eq!(fail.into_result(), Err("bad".to_string()));
    }

    #[test]
    #[should_panic(expected = "cannot take the value of a failed filter result")]
    fn test_value_of_failure_panics() {
        let _ = FilterResult::<i32>::fail("bad").value();
    }

    #[test]
    #[should_panic(expected = "cannot take the message of a passed filter result")]
    fn test_message_of_pass_panics() {
        let _ = FilterResult::ok(1).message().len();
    }

    #[test]
    fn test_from_parse_result() {
        let parsed: FilterResult<i32> = "42".parse::<i32>().into();
        assert_eq!(parsed, FilterResult::ok(42));

        let failed: FilterResult<i32> = "x".parse::<i32>().into();
        assert_eq!(failed.message(), "invalid digit found in string");
    }

    #[test]
    fn test_then_fails_fast() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let next = Filter::new(move |v: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            FilterResult::ok(v * 10)
        });
        let chain = even().then(next);

        assert_eq!(chain.filter(4), FilterResult::ok(40));
        assert_eq!(chain.filter(3), FilterResult::fail("3 is not even"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_second_stage_message_propagates() {
        let chain = identity::<i32>().then(even());
        assert_eq!(chain.filter(1).message(), "1 is not even");
    }

    #[test]
    fn test_tap_runs_only_on_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let tapped = even().tap(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(tapped.filter(2).passed());
        assert!(tapped.filter(3).failed());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_observes_and_passes() {
        let seen = Capture::new();
        let slot = seen.clone();
        let observer = Filter::run(move |v: &String| slot.set(v.clone()));

        assert_eq!(observer.filter("x".to_string()), FilterResult::ok("x".to_string()));
        assert_eq!(seen.get(), Some("x".to_string()));
    }

    #[test]
    fn test_error_replaces_message() {
        let filter = even().error("must be even");
        assert_eq!(filter.filter(1).message(), "must be even");
        assert_eq!(filter.filter(2), FilterResult::ok(2));
    }

    #[test]
    fn test_map() {
        let filter = even().map(|v| v.to_string());
        assert_eq!(filter.filter(8), FilterResult::ok("8".to_string()));
    }

    #[test]
    fn test_for_each_collects_every_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lifted = even()
            .tap(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .for_each();

        let result = lifted.filter(vec![1, 2, 3, 4]);
        assert_eq!(
            result.message(),
            "One or more filters failed while being applied to a list:\n\
             [0] 1 is not even\n\
             [2] 3 is not even"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_for_each_preserves_order() {
        let lifted = identity::<i32>().map(|v| v * 2).for_each();
        assert_eq!(lifted.filter(vec![3, 1, 2]), FilterResult::ok(vec![6, 2, 4]));
        assert_eq!(lifted.filter(Vec::new()), FilterResult::ok(Vec::new()));
    }

    #[test]
    fn test_filters_are_shareable() {
        let filter = even();
        let copy = filter.clone();
        let handle = std::thread::spawn(move || copy.filter(6).passed());
        assert!(handle.join().unwrap());
        assert!(filter.filter(6).passed());
    }
}
