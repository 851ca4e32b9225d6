//! # cfgspec
//!
//! A declarative validator for hierarchical configuration that reports every
//! violation in one pass.
//!
//! ## Overview
//!
//! A schema tree describes which paths a configuration must contain, which
//! kind of value each holds, and which filters each value must pass.
//! Validating a [`Source`] against it walks the whole tree and collects every
//! missing node, wrong type and filter failure instead of stopping at the
//! first one. Accumulation is built on stillwater's `Validation` type.
//!
//! ## Core Types
//!
//! - [`Filter`]: a composable function from a value to a [`FilterResult`]
//! - [`Source`]: a path-addressed, read-only view over a configuration tree
//! - [`Schema`]: entry point for building [`Node`], [`List`] and [`Spec`] positions
//! - [`ValidationResult`]: the pass/fail report of a validation run
//! - [`ValidationFailure`]: a single failing node with its [`ConfigPath`]
//!
//! ## Example
//!
//! ```rust
//! use cfgspec::{filters, MapSource, Schema, Filter};
//!
//! let even = Filter::predicate(|v: &i32| v % 2 == 0, |v| format!("{} is odd", v));
//!
//! let spec = Schema::spec()
//!     .add_child("name", Schema::string().with_filter(filters::non_empty()))
//!     .add_child("port", Schema::node(filters::positive::<i32>()))
//!     .add_child("shards", Schema::list_with(even, filters::min_items(1)));
//!
//! let source = MapSource::from_json_str(
//!     r#"{"name": "svc", "port": -1, "shards": [2, 3]}"#,
//! ).unwrap();
//!
//! let result = spec.validate(&source);
//! assert!(!result.passed());
//! assert_eq!(result.errors().unwrap().len(), 2);
//! assert!(result.message().contains("port: filter failed: must be positive, got -1"));
//! assert!(result.message().contains("shards[1]: filter failed: 3 is odd"));
//! ```

pub mod error;
pub mod filter;
pub mod path;
pub mod schema;
pub mod source;
pub mod validation;

pub use error::{FailureReason, SourceError, ValidationErrors, ValidationFailure};
pub use filter::builtin as filters;
pub use filter::{identity, Capture, Filter, FilterResult};
pub use path::{ConfigPath, PathSegment};
pub use schema::{List, Node, NodeLike, NodeValidator, Schema, Spec};
pub use source::{ConfigValue, Element, MapSource, Primitive, PrimitiveKind, Section, Source};
pub use validation::{ValidationResult, SUCCESS_MESSAGE};

/// Type alias for the accumulating result of evaluating a schema position.
pub type NodeValidation<T> = stillwater::Validation<T, ValidationErrors>;
