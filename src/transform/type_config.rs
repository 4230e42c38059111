use std::{collections::BTreeMap, path::Path};

use error_stack::{report, ResultExt};
use serde_json::Value;
use thiserror::Error;

use super::type_tag::TypeTag;

#[derive(Error, Debug)]
pub enum TypeConfigError {
    #[error("Failed to read type configuration")]
    Read,
    #[error("Type configuration is not valid JSON")]
    Parse,
    #[error("Type configuration must be a JSON object or array")]
    Malformed,
}

/// Column index -> declared type.
///
/// Accepts either an object (`{"1": "number"}`) or an array indexed by
/// position. Keys that are not column indices are dropped and unrecognized
/// tags become [`TypeTag::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeConfig(BTreeMap<usize, TypeTag>);

impl TypeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: usize, tag: TypeTag) -> Self {
        self.0.insert(column, tag);
        self
    }

    pub fn get(&self, column: usize) -> Option<TypeTag> {
        self.0.get(&column).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_json_str(json: &str) -> error_stack::Result<Self, TypeConfigError> {
        let value: Value = serde_json::from_str(json).change_context(TypeConfigError::Parse)?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &Value) -> error_stack::Result<Self, TypeConfigError> {
        let entries = match value {
            Value::Object(map) => map
                .iter()
                .filter_map(|(key, tag)| Some((key.trim().parse::<usize>().ok()?, tag_of(tag))))
                .collect(),
            Value::Array(tags) => tags
                .iter()
                .enumerate()
                .map(|(column, tag)| (column, tag_of(tag)))
                .collect(),
            _ => return Err(report!(TypeConfigError::Malformed)),
        };

        Ok(TypeConfig(entries))
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> error_stack::Result<Self, TypeConfigError> {
        let json = std::fs::read_to_string(path)
            .change_context(TypeConfigError::Read)
            .attach_printable_lazy(|| format!("Could not read {}", path.display()))?;

        let config = Self::from_json_str(&json)
            .attach_printable_lazy(|| format!("In file {}", path.display()))?;
        tracing::debug!("Loaded {} column types from {}", config.len(), path.display());

        Ok(config)
    }
}

fn tag_of(value: &Value) -> TypeTag {
    value.as_str().map(TypeTag::from_tag).unwrap_or_default()
}
