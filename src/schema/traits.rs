//! Traits for schema polymorphism.
//!
//! This module provides the [`NodeLike`] trait shared by every schema
//! position ([`Node`](super::Node), [`List`](super::List) and
//! [`Spec`](super::Spec)) and its type-erased companion [`NodeValidator`],
//! which lets a spec hold children with different output types.

use crate::path::ConfigPath;
use crate::source::{PrimitiveKind, Source};
use crate::NodeValidation;

/// A schema position that can be validated against a source.
///
/// `path` is where the value lives relative to `source`; `at` is the
/// absolute location used when reporting failures. A spec validating its
/// children passes its own section as `source`, the child's relative key as
/// `path`, and its own location extended by that key as `at`.
///
/// The `Send + Sync` bounds allow a built schema to be shared across
/// threads and stored behind `Arc<dyn NodeValidator>`.
pub trait NodeLike: Send + Sync {
    /// The output type produced by the position's filter chain.
    type Output;

    /// The kind this position requires.
    fn kind(&self) -> PrimitiveKind;

    /// Validates the value at `path`, returning the filter output or every
    /// failure found.
    fn evaluate_at(
        &self,
        source: &dyn Source,
        path: &str,
        at: &ConfigPath,
    ) -> NodeValidation<Self::Output>;
}

/// A type-erased [`NodeLike`] that only reports pass or fail.
///
/// Any `NodeLike` automatically implements `NodeValidator`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cfgspec::{NodeValidator, Schema};
///
/// let children: Vec<Arc<dyn NodeValidator>> = vec![
///     Arc::new(Schema::string()),
///     Arc::new(Schema::list::<i32>()),
///     Arc::new(Schema::spec()),
/// ];
/// assert_eq!(children.len(), 3);
/// ```
pub trait NodeValidator: Send + Sync {
    /// The kind the erased position requires.
    fn node_kind(&self) -> PrimitiveKind;

    fn check(&self, source: &dyn Source, path: &str, at: &ConfigPath) -> NodeValidation<()>;
}

impl<N: NodeLike> NodeValidator for N {
    fn node_kind(&self) -> PrimitiveKind {
        self.kind()
    }

    fn check(&self, source: &dyn Source, path: &str, at: &ConfigPath) -> NodeValidation<()> {
        self.evaluate_at(source, path, at).map(|_| ())
    }
}
