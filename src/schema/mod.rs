//! Schema definitions for validation.
//!
//! This module provides the three kinds of schema position: [`Node`] for a
//! single value, [`List`] for a sequence and [`Spec`] for a section with
//! named children. Every position validates all of its children rather than
//! short-circuiting on the first failure.
//!
//! # Example
//!
//! ```rust
//! use cfgspec::{filters, MapSource, Schema};
//!
//! let spec = Schema::spec()
//!     .add_child("name", Schema::string())
//!     .add_child("db", Schema::spec()
//!         .add_child("port", Schema::node(filters::range(1, 65535)))
//!         .add_child("replicas", Schema::list::<String>()));
//!
//! let source = MapSource::new()
//!     .with("name", "svc")
//!     .with("db", MapSource::new()
//!         .with("port", 5432)
//!         .with("replicas", vec!["a", "b"]));
//!
//! assert!(spec.validate(&source).passed());
//! ```

mod list;
mod node;
mod spec;
mod traits;

pub use list::List;
pub use node::Node;
pub use spec::Spec;
pub use traits::{NodeLike, NodeValidator};

use crate::filter::{identity, Filter};
use crate::source::{Element, Primitive, Section};

/// Entry point for creating schema positions.
///
/// The per-kind constructors return nodes with an identity filter; attach
/// constraints with `with_filter`, or build a node around an existing filter
/// with [`Schema::node`].
///
/// # Example
///
/// ```rust
/// use cfgspec::{filters, Schema};
///
/// let name = Schema::string().with_filter(filters::non_empty());
/// let port = Schema::node(filters::positive::<i32>());
/// let tags = Schema::list::<String>();
/// ```
pub struct Schema;

impl Schema {
    pub fn boolean() -> Node<bool, bool> {
        Node::new(identity())
    }

    pub fn byte() -> Node<i8, i8> {
        Node::new(identity())
    }

    pub fn short() -> Node<i16, i16> {
        Node::new(identity())
    }

    pub fn integer() -> Node<i32, i32> {
        Node::new(identity())
    }

    pub fn long() -> Node<i64, i64> {
        Node::new(identity())
    }

    pub fn float() -> Node<f32, f32> {
        Node::new(identity())
    }

    pub fn double() -> Node<f64, f64> {
        Node::new(identity())
    }

    pub fn string() -> Node<String, String> {
        Node::new(identity())
    }

    /// Creates a node that only requires a section at its path.
    ///
    /// Use [`Schema::spec`] to describe the section's children.
    pub fn section() -> Node<Section, Section> {
        Node::new(identity())
    }

    /// Creates a node of kind `T` running `filter`.
    pub fn node<T: Primitive, U: 'static>(filter: Filter<T, U>) -> Node<T, U> {
        Node::new(filter)
    }

    /// Creates a spec without children that passes the section through.
    pub fn spec() -> Spec<Section> {
        Spec::new(identity())
    }

    /// Creates a spec without children whose section filter is `filter`.
    pub fn spec_with<U: 'static>(filter: Filter<Section, U>) -> Spec<U> {
        Spec::new(filter)
    }

    /// Creates a list of `T` that passes its elements through.
    pub fn list<T: Element>() -> List<T, T, Vec<T>> {
        List::new(identity(), identity())
    }

    /// Creates a list from an element filter and a list-level filter.
    pub fn list_with<T: Element, U: 'static, V: 'static>(
        element: Filter<T, U>,
        filter: Filter<Vec<U>, V>,
    ) -> List<T, U, V> {
        List::new(element, filter)
    }

    /// Creates a list whose every element is a section validated by `spec`.
    ///
    /// ```rust
    /// use cfgspec::{MapSource, Schema};
    ///
    /// let server = Schema::spec().add_child("host", Schema::string());
    /// let servers = Schema::section_list(&server);
    ///
    /// let source = MapSource::new().with("servers", vec![
    ///     MapSource::new().with("host", "a"),
    ///     MapSource::new().with("port", 1),
    /// ]);
    ///
    /// let result = servers.validate(&source, "servers");
    /// assert_eq!(result.errors().unwrap().at_path("servers[1].host").len(), 1);
    /// ```
    pub fn section_list<U: 'static>(spec: &Spec<U>) -> List<Section, U, Vec<U>> {
        List::of_sections(spec, identity())
    }

    /// Creates a list whose every element is a list validated by `inner`.
    ///
    /// ```rust
    /// use cfgspec::{filters, MapSource, Schema};
    ///
    /// let row = Schema::list_with(filters::positive::<i32>(), filters::min_items(1));
    /// let matrix = Schema::nested_list(&row);
    ///
    /// let source = MapSource::new().with("matrix", vec![vec![1, 2], vec![3, -4], vec![]]);
    /// let result = matrix.validate(&source, "matrix");
    ///
    /// let errors = result.errors().unwrap();
    /// assert_eq!(errors.at_path("matrix[1][1]").len(), 1);
    /// assert_eq!(errors.at_path("matrix[2]").len(), 1);
    /// ```
    pub fn nested_list<E: Element, X: 'static, U: 'static>(
        inner: &List<E, X, U>,
    ) -> List<Vec<E>, U, Vec<U>> {
        List::of_lists(inner, identity())
    }
}
