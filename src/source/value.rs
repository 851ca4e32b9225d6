//! The value model shared by sources.

use std::fmt;
use std::sync::Arc;

use super::{PrimitiveKind, Section};

/// A single configuration value of any supported kind.
///
/// Backends that store untyped data (maps of string to anything, parsed
/// documents) expose it as a `ConfigValue`. The `as_*` accessors are the one
/// place where a stored value is matched against a requested kind; every
/// typed accessor of [`Source`](super::Source) and every element conversion
/// of a list goes through them.
///
/// Integral values convert to any integer kind they fit losslessly. A
/// `Float` widens to a double, and a `Double` narrows to a float only when it
/// round-trips exactly. NaN narrows to NaN.
#[derive(Clone)]
pub enum ConfigValue {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Section(Section),
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    /// Returns the kind this value was stored as.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            ConfigValue::Boolean(_) => PrimitiveKind::Boolean,
            ConfigValue::Byte(_) => PrimitiveKind::Byte,
            ConfigValue::Short(_) => PrimitiveKind::Short,
            ConfigValue::Integer(_) => PrimitiveKind::Integer,
            ConfigValue::Long(_) => PrimitiveKind::Long,
            ConfigValue::Float(_) => PrimitiveKind::Float,
            ConfigValue::Double(_) => PrimitiveKind::Double,
            ConfigValue::String(_) => PrimitiveKind::String,
            ConfigValue::Section(_) => PrimitiveKind::Section,
            ConfigValue::List(_) => PrimitiveKind::List,
        }
    }

    /// Returns true if this value can be read as `kind`.
    pub fn matches(&self, kind: PrimitiveKind) -> bool {
        match kind {
            PrimitiveKind::Boolean => self.as_bool().is_some(),
            PrimitiveKind::Byte => self.as_i8().is_some(),
            PrimitiveKind::Short => self.as_i16().is_some(),
            PrimitiveKind::Integer => self.as_i32().is_some(),
            PrimitiveKind::Long => self.as_i64().is_some(),
            PrimitiveKind::Float => self.as_f32().is_some(),
            PrimitiveKind::Double => self.as_f64().is_some(),
            PrimitiveKind::String => self.as_str().is_some(),
            PrimitiveKind::Section => self.as_section().is_some(),
            PrimitiveKind::List => self.as_list().is_some(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn as_integral(&self) -> Option<i64> {
        match self {
            ConfigValue::Byte(v) => Some(i64::from(*v)),
            ConfigValue::Short(v) => Some(i64::from(*v)),
            ConfigValue::Integer(v) => Some(i64::from(*v)),
            ConfigValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        self.as_integral().and_then(|v| i8::try_from(v).ok())
    }

    pub fn as_i16(&self) -> Option<i16> {
        self.as_integral().and_then(|v| i16::try_from(v).ok())
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_integral().and_then(|v| i32::try_from(v).ok())
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_integral()
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ConfigValue::Float(v) => Some(*v),
            ConfigValue::Double(v) => {
                let narrowed = *v as f32;
                (v.is_nan() || f64::from(narrowed) == *v).then_some(narrowed)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(v) => Some(f64::from(*v)),
            ConfigValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            ConfigValue::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Consumes this value, returning the list elements if it is a list.
    pub fn into_list(self) -> Option<Vec<ConfigValue>> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
            ConfigValue::Byte(v) => f.debug_tuple("Byte").field(v).finish(),
            ConfigValue::Short(v) => f.debug_tuple("Short").field(v).finish(),
            ConfigValue::Integer(v) => f.debug_tuple("Integer").field(v).finish(),
            ConfigValue::Long(v) => f.debug_tuple("Long").field(v).finish(),
            ConfigValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            ConfigValue::Double(v) => f.debug_tuple("Double").field(v).finish(),
            ConfigValue::String(v) => f.debug_tuple("String").field(v).finish(),
            ConfigValue::Section(_) => f.write_str("Section(..)"),
            ConfigValue::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

// Sections compare by identity; they are views, not data.
impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConfigValue::Boolean(a), ConfigValue::Boolean(b)) => a == b,
            (ConfigValue::Byte(a), ConfigValue::Byte(b)) => a == b,
            (ConfigValue::Short(a), ConfigValue::Short(b)) => a == b,
            (ConfigValue::Integer(a), ConfigValue::Integer(b)) => a == b,
            (ConfigValue::Long(a), ConfigValue::Long(b)) => a == b,
            (ConfigValue::Float(a), ConfigValue::Float(b)) => a == b,
            (ConfigValue::Double(a), ConfigValue::Double(b)) => a == b,
            (ConfigValue::String(a), ConfigValue::String(b)) => a == b,
            (ConfigValue::Section(a), ConfigValue::Section(b)) => Arc::ptr_eq(a, b),
            (ConfigValue::List(a), ConfigValue::List(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! from_scalar {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for ConfigValue {
            fn from(value: $ty) -> Self {
                ConfigValue::$variant(value)
            }
        }
    };
}

from_scalar!(bool, Boolean);
from_scalar!(i8, Byte);
from_scalar!(i16, Short);
from_scalar!(i32, Integer);
from_scalar!(i64, Long);
from_scalar!(f32, Float);
from_scalar!(f64, Double);
from_scalar!(String, String);
from_scalar!(Section, Section);

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::List(items.into_iter().map(Into::into).collect())
    }
}
