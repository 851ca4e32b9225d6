//! YAML loading for [`MapSource`].

use std::sync::Arc;

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::SourceError;
use crate::path::DEFAULT_SEPARATOR;

use super::map::validated_separator;
use super::{ConfigValue, MapSource};

impl MapSource {
    /// Parses YAML text and builds a source from it.
    ///
    /// Conversion follows [`MapSource::from_json`]: nulls are absent,
    /// mappings become sections, and integers become `Integer` or `Long`.
    /// Scalar mapping keys are stringified and tags are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Yaml` for malformed text,
    /// `SourceError::UnsupportedKey` for a sequence or mapping used as a key,
    /// and otherwise the same errors as [`MapSource::from_json`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use cfgspec::{MapSource, Source};
    ///
    /// let source = MapSource::from_yaml_str("db:\n  port: 5432\n").unwrap();
    /// assert_eq!(source.get_integer("db.port"), Some(5432));
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self, SourceError> {
        let document: Value = serde_yaml::from_str(text)?;
        Self::from_yaml(&document)
    }

    /// Builds a source from a parsed YAML document.
    ///
    /// # Errors
    ///
    /// As [`MapSource::from_yaml_str`], except for syntax errors.
    pub fn from_yaml(document: &Value) -> Result<Self, SourceError> {
        Self::from_yaml_with_separator(document, DEFAULT_SEPARATOR)
    }

    /// Builds a source from a parsed YAML document using `separator` for
    /// every section in the tree.
    ///
    /// # Errors
    ///
    /// As [`MapSource::from_yaml`], plus `SourceError::InvalidSeparator` for
    /// an empty separator.
    pub fn from_yaml_with_separator(document: &Value, separator: &str) -> Result<Self, SourceError> {
        let separator = validated_separator(separator)?;
        match untag(document) {
            Value::Null => Ok(MapSource::from_parts(IndexMap::new(), separator)),
            mapping @ Value::Mapping(_) => mapping_to_source(mapping, &separator),
            other => Err(SourceError::NotASection {
                found: yaml_type_name(other),
            }),
        }
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn mapping_to_source(value: &Value, separator: &Arc<str>) -> Result<MapSource, SourceError> {
    let mut entries = IndexMap::new();
    if let Value::Mapping(map) = value {
        for (key, member) in map {
            let key = match key {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => return Err(SourceError::UnsupportedKey(format!("{:?}", other))),
            };
            if let Some(member) = yaml_to_value(member, separator)? {
                entries.insert(key, member);
            }
        }
    }
    Ok(MapSource::from_parts(entries, Arc::clone(separator)))
}

fn yaml_to_value(value: &Value, separator: &Arc<str>) -> Result<Option<ConfigValue>, SourceError> {
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
        Value::Sequence(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                converted.push(yaml_to_value(item, separator)?.ok_or(SourceError::NullElement)?);
            }
            ConfigValue::List(converted)
        }
        Value::Mapping(_) => mapping_to_source(value, separator)?.into(),
        Value::Tagged(tagged) => return yaml_to_value(&tagged.value, separator),
    };
    Ok(Some(converted))
}

fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
