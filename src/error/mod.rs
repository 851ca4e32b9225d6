//! Error types for validation failures and source construction.
//!
//! Validation outcomes are data: a failing validation yields
//! [`ValidationErrors`], a non-empty list of [`ValidationFailure`]s each
//! carrying the absolute path of the node and a [`FailureReason`]. Building a
//! source from a document can fail with a [`SourceError`].

mod source_error;
mod validation_error;

pub use source_error::SourceError;
pub use validation_error::{FailureReason, ValidationErrors, ValidationFailure};
