use std::{collections::BTreeSet, path::PathBuf};

use error_stack::ResultExt;

use crate::transform::{OutputShape, TransformOptions, TypeConfig};

use super::{app_config::ConfigError, lenient};

#[derive(serde::Deserialize, Debug, Clone)]
pub struct TransformConfig {
    #[serde(default, deserialize_with = "lenient::index")]
    pub header_row: usize,
    #[serde(default = "default_data_start_row", deserialize_with = "lenient::index")]
    pub data_start_row: usize,
    #[serde(default, deserialize_with = "lenient::optional_index")]
    pub type_row: Option<usize>,
    /// Title columns of the sheet, never exported.
    #[serde(default, deserialize_with = "lenient::column_set")]
    pub excluded_columns: BTreeSet<usize>,
    #[serde(default)]
    pub column_types_path: Option<PathBuf>,
    #[serde(default)]
    pub output_shape: OutputShape,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            header_row: 0,
            data_start_row: default_data_start_row(),
            type_row: None,
            excluded_columns: BTreeSet::new(),
            column_types_path: None,
            output_shape: OutputShape::default(),
        }
    }
}

fn default_data_start_row() -> usize {
    4
}

impl TransformConfig {
    /// Resolves the configuration into transformer options, reading the
    /// column types file when one is configured.
    pub fn to_options(&self) -> error_stack::Result<TransformOptions, ConfigError> {
        let column_types = match &self.column_types_path {
            Some(path) => TypeConfig::load(path).change_context(ConfigError::ColumnTypes)?,
            None => TypeConfig::default(),
        };

        Ok(TransformOptions {
            column_types,
            excluded_columns: self.excluded_columns.clone(),
            header_row: self.header_row,
            data_start_row: self.data_start_row,
            type_row: self.type_row,
            shape: self.output_shape,
        })
    }
}
