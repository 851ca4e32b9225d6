//! Read-only views over configuration trees.
//!
//! A [`Source`] exposes a configuration tree through path-addressed, typed
//! accessors: one existence predicate and one getter per [`PrimitiveKind`],
//! plus nested sections and lists. The validation engine only ever reads
//! through this trait, so any backend (an in-memory map, a parsed YAML
//! document, a library-specific configuration object) can be validated once
//! it implements [`Source::get`] and [`Source::get_section`].
//!
//! Which accessor pair belongs to which kind is decided once per carrier type
//! by the [`Element`] and [`Primitive`] traits. The engine never switches on a
//! kind to pick an accessor, so the type check and the read of a value always
//! go through the same accessor.

mod map;
mod value;
#[cfg(feature = "yaml")]
mod yaml;

use std::fmt::{self, Display};
use std::sync::Arc;

pub use map::MapSource;
pub use value::ConfigValue;

use crate::path::DEFAULT_SEPARATOR;

/// A shared handle to a nested section of a configuration.
///
/// Sections are the carrier type of [`PrimitiveKind::Section`]: a spec's
/// whole-section filter receives one, and lists of sections yield one per
/// element.
pub type Section = Arc<dyn Source>;

/// The shapes a schema position may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    String,
    Section,
    List,
}

impl PrimitiveKind {
    /// Returns the lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
            PrimitiveKind::Section => "section",
            PrimitiveKind::List => "list",
        }
    }
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A read-only, path-addressed view over a configuration tree.
///
/// Implementors provide raw lookup through [`get`](Source::get) and
/// [`get_section`](Source::get_section); every typed accessor has a default
/// implementation on top of those two. Backends with their own notion of
/// type conversion may override any of them, as long as each `is_*`
/// predicate agrees with its `get_*` getter.
///
/// # Empty path
///
/// The empty path addresses the source itself: `contains_node("")` and
/// `is_section("")` are true and `get_section("")` returns a source
/// equivalent to `self`.
///
/// # Shape mismatches
///
/// Accessors return `None` or `false` when a value is missing or has the
/// wrong shape. They never panic for either case.
pub trait Source: Send + Sync {
    /// Returns the value at `path`, or `None` if nothing is stored there.
    fn get(&self, path: &str) -> Option<ConfigValue>;

    /// Returns the section at `path` as a new source scoped to that subtree.
    fn get_section(&self, path: &str) -> Option<Section>;

    /// Returns the separator this source uses to split nested paths.
    fn separator(&self) -> &str {
        DEFAULT_SEPARATOR
    }

    /// Returns true if some value of any kind exists at `path`.
    fn contains_node(&self, path: &str) -> bool {
        path.is_empty() || self.get(path).is_some()
    }

    fn is_boolean(&self, path: &str) -> bool {
        self.get_boolean(path).is_some()
    }

    fn get_boolean(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    fn is_byte(&self, path: &str) -> bool {
        self.get_byte(path).is_some()
    }

    fn get_byte(&self, path: &str) -> Option<i8> {
        self.get(path)?.as_i8()
    }

    fn is_short(&self, path: &str) -> bool {
        self.get_short(path).is_some()
    }

    fn get_short(&self, path: &str) -> Option<i16> {
        self.get(path)?.as_i16()
    }

    fn is_integer(&self, path: &str) -> bool {
        self.get_integer(path).is_some()
    }

    fn get_integer(&self, path: &str) -> Option<i32> {
        self.get(path)?.as_i32()
    }

    fn is_long(&self, path: &str) -> bool {
        self.get_long(path).is_some()
    }

    fn get_long(&self, path: &str) -> Option<i64> {
        self.get(path)?.as_i64()
    }

    fn is_float(&self, path: &str) -> bool {
        self.get_float(path).is_some()
    }

    fn get_float(&self, path: &str) -> Option<f32> {
        self.get(path)?.as_f32()
    }

    fn is_double(&self, path: &str) -> bool {
        self.get_double(path).is_some()
    }

    fn get_double(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_f64()
    }

    fn is_string(&self, path: &str) -> bool {
        self.get_string(path).is_some()
    }

    fn get_string(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn is_section(&self, path: &str) -> bool {
        path.is_empty() || self.get_section(path).is_some()
    }

    /// Returns true if `path` holds a list whose every element has shape `element`.
    fn is_list(&self, path: &str, element: PrimitiveKind) -> bool {
        self.get_list(path, element).is_some()
    }

    /// Returns the elements of the list at `path` if every one has shape `element`.
    fn get_list(&self, path: &str, element: PrimitiveKind) -> Option<Vec<ConfigValue>> {
        let items = self.get(path)?.into_list()?;
        items
            .iter()
            .all(|item| item.matches(element))
            .then_some(items)
    }
}

/// A Rust type that can be read out of a [`ConfigValue`].
///
/// Implemented for the carrier of every [`PrimitiveKind`], including
/// `Vec<E>` for lists, so list elements of any kind (lists of lists
/// included) convert through the same dispatch.
pub trait Element: Sized + Send + Sync + 'static {
    /// The kind this type is the carrier of.
    const KIND: PrimitiveKind;

    /// Converts a value of this kind, returning `None` on a shape mismatch.
    fn from_value(value: ConfigValue) -> Option<Self>;
}

/// A carrier type that a plain [`Node`](crate::Node) may declare.
///
/// Pairs the existence predicate and the getter of one kind. Lists do not
/// implement this trait: a list position needs an element kind, which only a
/// [`List`](crate::List) carries.
pub trait Primitive: Element {
    /// Returns true if `path` holds a value of this kind.
    fn is_at(source: &dyn Source, path: &str) -> bool;

    /// Reads the value at `path` as this kind.
    fn read_at(source: &dyn Source, path: &str) -> Option<Self>;
}

macro_rules! primitive {
    ($ty:ty, $kind:ident, $is:ident, $get:ident, $as:ident) => {
        impl Element for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            fn from_value(value: ConfigValue) -> Option<Self> {
                value.$as()
            }
        }

        impl Primitive for $ty {
            fn is_at(source: &dyn Source, path: &str) -> bool {
                source.$is(path)
            }

            fn read_at(source: &dyn Source, path: &str) -> Option<Self> {
                source.$get(path)
            }
        }
    };
}

primitive!(bool, Boolean, is_boolean, get_boolean, as_bool);
primitive!(i8, Byte, is_byte, get_byte, as_i8);
primitive!(i16, Short, is_short, get_short, as_i16);
primitive!(i32, Integer, is_integer, get_integer, as_i32);
primitive!(i64, Long, is_long, get_long, as_i64);
primitive!(f32, Float, is_float, get_float, as_f32);
primitive!(f64, Double, is_double, get_double, as_f64);

impl Element for String {
    const KIND: PrimitiveKind = PrimitiveKind::String;

    fn from_value(value: ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Primitive for String {
    fn is_at(source: &dyn Source, path: &str) -> bool {
        source.is_string(path)
    }

    fn read_at(source: &dyn Source, path: &str) -> Option<Self> {
        source.get_string(path)
    }
}

impl Element for Section {
    const KIND: PrimitiveKind = PrimitiveKind::Section;

    fn from_value(value: ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Section(section) => Some(section),
            _ => None,
        }
    }
}

impl Primitive for Section {
    fn is_at(source: &dyn Source, path: &str) -> bool {
        source.is_section(path)
    }

    fn read_at(source: &dyn Source, path: &str) -> Option<Self> {
        source.get_section(path)
    }
}

impl<E: Element> Element for Vec<E> {
    const KIND: PrimitiveKind = PrimitiveKind::List;

    fn from_value(value: ConfigValue) -> Option<Self> {
        value.into_list()?.into_iter().map(E::from_value).collect()
    }
}
