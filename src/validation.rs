//! The aggregated outcome of a validation run.

use std::fmt::{self, Display};
use std::sync::OnceLock;

use stillwater::Validation;

use crate::error::{ValidationErrors, ValidationFailure};
use crate::NodeValidation;

/// The message of every passing [`ValidationResult`].
pub const SUCCESS_MESSAGE: &str = "Validation passed";

/// The pass/fail report of validating a source against a schema.
///
/// The human-readable [`message`](ValidationResult::message) is rendered on
/// first access and cached.
///
/// # Example
///
/// ```rust
/// use cfgspec::{MapSource, Schema, SUCCESS_MESSAGE};
///
/// let spec = Schema::spec().add_child("port", Schema::integer());
///
/// let ok = spec.validate(&MapSource::new().with("port", 80));
/// assert!(ok.passed());
/// assert_eq!(ok.message(), SUCCESS_MESSAGE);
///
/// let bad = spec.validate(&MapSource::new());
/// assert_eq!(
///     bad.message(),
///     "Validation failed with 1 error(s):\n  1. port: missing: the node is not contained in the config"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ValidationResult {
    errors: Option<ValidationErrors>,
    message: OnceLock<String>,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self {
            errors: None,
            message: OnceLock::new(),
        }
    }

    pub fn fail(errors: ValidationErrors) -> Self {
        Self {
            errors: Some(errors),
            message: OnceLock::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.errors.is_none()
    }

    /// Returns [`SUCCESS_MESSAGE`] for a pass, or one line per failure.
    pub fn message(&self) -> &str {
        self.message.get_or_init(|| match &self.errors {
            None => SUCCESS_MESSAGE.to_string(),
            Some(errors) => errors.to_string().trim_end().to_string(),
        })
    }

    /// Returns the failures, or `None` for a pass.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    /// Iterates over the failures; empty for a pass.
    pub fn failures(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.errors.iter().flat_map(|errors| errors.iter())
    }

    /// Calls `handler` with this result and returns it for further chaining.
    ///
    /// ```rust
    /// use cfgspec::{MapSource, Schema};
    ///
    /// let passed = Schema::spec()
    ///     .validate(&MapSource::new())
    ///     .handle(|r| println!("{}", r.message()))
    ///     .passed();
    /// assert!(passed);
    /// ```
    pub fn handle(self, handler: impl FnOnce(&Self)) -> Self {
        handler(&self);
        self
    }

    /// Like [`handle`](ValidationResult::handle) with a fallible handler.
    ///
    /// # Errors
    ///
    /// Returns the handler's error.
    pub fn try_handle<E>(self, handler: impl FnOnce(&Self) -> Result<(), E>) -> Result<Self, E> {
        handler(&self)?;
        Ok(self)
    }

    /// Converts this result for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the collected failures if validation failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self.errors {
            None => Ok(()),
            Some(errors) => Err(errors),
        }
    }
}

impl Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl<T> From<NodeValidation<T>> for ValidationResult {
    fn from(validation: NodeValidation<T>) -> Self {
        match validation {
            Validation::Success(_) => ValidationResult::pass(),
            Validation::Failure(errors) => ValidationResult::fail(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::ConfigPath;

    fn failing() -> ValidationResult {
        ValidationResult::fail(ValidationErrors::single(ValidationFailure::missing(
            ConfigPath::from_field("a"),
        )))
    }

    #[test]
    fn test_pass() {
        let result = ValidationResult::pass();
        assert!(result.passed());
        assert_eq!(result.message(), SUCCESS_MESSAGE);
        assert!(result.errors().is_none());
        assert_eq!(result.failures().count(), 0);
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_fail() {
        let result = failing();
        assert!(!result.passed());
        assert_eq!(result.failures().count(), 1);
        assert!(result.message().ends_with("a: missing: the node is not contained in the config"));
        assert_eq!(result.to_string(), result.message());
    }

    #[test]
    fn test_message_is_cached() {
        let result = failing();
        let first = result.message().as_ptr();
        assert_eq!(result.message().as_ptr(), first);
    }

    #[test]
    fn test_handle_runs_once() {
        let mut calls = 0;
        let result = failing().handle(|_| calls += 1);
        assert_eq!(calls, 1);
        assert!(!result.passed());
    }

    #[test]
    fn test_try_handle_propagates() {
        let outcome = failing().try_handle(|r| {
            if r.passed() {
                Ok(())
            } else {
                Err("invalid config")
            }
        });
        assert_eq!(outcome.err(), Some("invalid config"));
    }

    #[test]
    fn test_from_validation() {
        let ok: NodeValidation<i32> = Validation::Success(1);
        assert!(ValidationResult::from(ok).passed());
    }
}
