//! An in-memory source backed by an insertion-ordered map.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::SourceError;
use crate::path::DEFAULT_SEPARATOR;

use super::{ConfigValue, Section, Source};

/// A [`Source`] over a map of keys to [`ConfigValue`]s.
///
/// Nested sections are stored as `ConfigValue::Section` entries. A path is
/// resolved by first looking up the whole path as a key, then by splitting
/// it at each occurrence of the separator (leftmost first) and resolving the
/// remainder inside the nested section found under the prefix. Flat keys
/// containing the separator therefore still resolve.
///
/// `MapSource` is cheap to clone: the entries are shared.
///
/// # Example
///
/// ```rust
/// use cfgspec::{MapSource, Source};
///
/// let source = MapSource::new()
///     .with("name", "svc")
///     .with("db", MapSource::new().with("port", 5432));
///
/// assert_eq!(source.get_integer("db.port"), Some(5432));
/// assert!(source.is_section("db"));
/// assert!(!source.contains_node("db.host"));
/// ```
#[derive(Clone)]
pub struct MapSource {
    entries: Arc<IndexMap<String, ConfigValue>>,
    separator: Arc<str>,
}

impl Default for MapSource {
    fn default() -> Self {
        Self {
            entries: Arc::new(IndexMap::new()),
            separator: Arc::from(DEFAULT_SEPARATOR),
        }
    }
}

impl MapSource {
    /// Creates an empty source using `.` as separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and returns self for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an entry, returning the value previously stored under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        Arc::make_mut(&mut self.entries).insert(key.into(), value.into())
    }

    /// Sets the separator used to split nested paths at this level.
    ///
    /// Nested sections resolve the remainder of a path with their own
    /// separator; sources loaded through [`from_json_with_separator`]
    /// share one separator across the whole tree.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidSeparator` if `separator` is empty.
    ///
    /// [`from_json_with_separator`]: MapSource::from_json_with_separator
    pub fn with_separator(mut self, separator: &str) -> Result<Self, SourceError> {
        self.separator = validated_separator(separator)?;
        Ok(self)
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Builds a source from a parsed JSON document.
    ///
    /// The document must be an object (or null, which yields an empty
    /// source). Object members holding null are skipped, nested objects
    /// become sections, integers become `Integer` when they fit 32 bits and
    /// `Long` otherwise, and other numbers become `Double`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotASection` if the root is not an object,
    /// `SourceError::NullElement` for a null inside an array, and
    /// `SourceError::UnsupportedNumber` for integers beyond `i64`.
    pub fn from_json(document: &Value) -> Result<Self, SourceError> {
        Self::from_json_with_separator(document, DEFAULT_SEPARATOR)
    }

    /// Builds a source from a parsed JSON document using `separator` for
    /// every section in the tree.
    ///
    /// # Errors
    ///
    /// As [`from_json`](MapSource::from_json), plus
    /// `SourceError::InvalidSeparator` for an empty separator.
    pub fn from_json_with_separator(document: &Value, separator: &str) -> Result<Self, SourceError> {
        let separator = validated_separator(separator)?;
        match document {
            Value::Null => Ok(Self::from_parts(IndexMap::new(), separator)),
            Value::Object(members) => {
                let mut entries = IndexMap::with_capacity(members.len());
                for (key, value) in members {
                    if let Some(value) = json_to_value(value, &separator)? {
                        entries.insert(key.clone(), value);
                    }
                }
                Ok(Self::from_parts(entries, separator))
            }
            other => Err(SourceError::NotASection {
                found: json_type_name(other),
            }),
        }
    }

    /// Parses JSON text and builds a source from it.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Json` for malformed text, otherwise as
    /// [`from_json`](MapSource::from_json).
    pub fn from_json_str(text: &str) -> Result<Self, SourceError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_json(&document)
    }

    pub(crate) fn from_parts(entries: IndexMap<String, ConfigValue>, separator: Arc<str>) -> Self {
        Self {
            entries: Arc::new(entries),
            separator,
        }
    }

    fn lookup(&self, path: &str) -> Option<ConfigValue> {
        if let Some(value) = self.entries.get(path) {
            return Some(value.clone());
        }
        path.match_indices(&*self.separator).find_map(|(idx, sep)| {
            let rest = &path[idx + sep.len()..];
            match self.entries.get(&path[..idx])? {
                ConfigValue::Section(section) if !rest.is_empty() => section.get(rest),
                _ => None,
            }
        })
    }
}

impl Source for MapSource {
    fn get(&self, path: &str) -> Option<ConfigValue> {
        if path.is_empty() {
            return Some(ConfigValue::Section(Arc::new(self.clone())));
        }
        self.lookup(path)
    }

    fn get_section(&self, path: &str) -> Option<Section> {
        if path.is_empty() {
            return Some(Arc::new(self.clone()));
        }
        match self.lookup(path)? {
            ConfigValue::Section(section) => Some(section),
            _ => None,
        }
    }

    fn separator(&self) -> &str {
        &self.separator
    }
}

impl From<MapSource> for ConfigValue {
    fn from(source: MapSource) -> Self {
        ConfigValue::Section(Arc::new(source))
    }
}

pub(crate) fn validated_separator(separator: &str) -> Result<Arc<str>, SourceError> {
    if separator.is_empty() {
        return Err(SourceError::InvalidSeparator);
    }
    Ok(Arc::from(separator))
}

fn json_to_value(value: &Value, separator: &Arc<str>) -> Result<Option<ConfigValue>, SourceError> {
    let converted = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => ConfigValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).map_or(ConfigValue::Long(i), ConfigValue::Integer)
            } else if n.is_u64() {
                return Err(SourceError::UnsupportedNumber(n.to_string()));
            } else {
                match n.as_f64() {
                    Some(f) => ConfigValue::Double(f),
                    None => return Err(SourceError::UnsupportedNumber(n.to_string())),
                }
            }
        }
        Value::String(s) => ConfigValue::String(s.clone()),
        Value::Array(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                converted.push(json_to_value(item, separator)?.ok_or(SourceError::NullElement)?);
            }
            ConfigValue::List(converted)
        }
        Value::Object(members) => {
            let mut entries = IndexMap::with_capacity(members.len());
            for (key, member) in members {
                if let Some(member) = json_to_value(member, separator)? {
                    entries.insert(key.clone(), member);
                }
            }
            MapSource::from_parts(entries, Arc::clone(separator)).into()
        }
    };
    Ok(Some(converted))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
