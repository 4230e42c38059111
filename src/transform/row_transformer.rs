use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::{
    coerce::coerce,
    record::{FieldValue, Output, OutputShape, Record},
    slug::slugify,
    type_config::TypeConfig,
    type_tag::TypeTag,
};
use crate::sheets::grid::Grid;

pub const SLUG_KEY: &str = "slug";
pub const NAME_KEY: &str = "name";

/// Everything the transformer needs to know about the sheet layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub column_types: TypeConfig,
    pub excluded_columns: BTreeSet<usize>,
    pub header_row: usize,
    pub data_start_row: usize,
    /// Row holding per-column type tags. Entries of `column_types` win over it.
    pub type_row: Option<usize>,
    pub shape: OutputShape,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            column_types: TypeConfig::default(),
            excluded_columns: BTreeSet::new(),
            header_row: 0,
            data_start_row: 4,
            type_row: None,
            shape: OutputShape::List,
        }
    }
}

pub struct RowTransformer<'a> {
    options: &'a TransformOptions,
    headers: &'a [String],
    row_tags: &'a [String],
    /// Column 0 is exported, so `slug` and `name` belong to it.
    derives_identity: bool,
}

impl<'a> RowTransformer<'a> {
    /// Returns `None` when the grid has no header row.
    pub fn new(grid: &'a Grid, options: &'a TransformOptions) -> Option<Self> {
        let headers = grid.row(options.header_row)?;
        let row_tags = options
            .type_row
            .and_then(|index| grid.row(index))
            .unwrap_or(&[]);

        let derives_identity = !options.excluded_columns.contains(&0);
        if derives_identity {
            for (column, header) in headers.iter().enumerate().skip(1) {
                if is_reserved(header) && !options.excluded_columns.contains(&column) {
                    tracing::warn!(
                        "Column {} is named '{}', which is derived from column 0; its values are dropped",
                        column,
                        header
                    );
                }
            }
        }

        Some(Self {
            options,
            headers,
            row_tags,
            derives_identity,
        })
    }

    fn tag_for(&self, column: usize) -> TypeTag {
        self.options
            .column_types
            .get(column)
            .or_else(|| self.row_tags.get(column).map(|tag| TypeTag::from_tag(tag)))
            .unwrap_or_default()
    }

    pub fn transform_row(&self, row: &[String]) -> Record {
        let mut record = Record::new();

        for (column, cell) in row.iter().enumerate() {
            if self.options.excluded_columns.contains(&column) {
                continue;
            }
            let Some(header) = self.headers.get(column) else {
                continue;
            };
            if column != 0 && self.derives_identity && is_reserved(header) {
                continue;
            }

            if let Some(value) = coerce(cell, self.tag_for(column)) {
                record.insert(header.as_str(), value);
            }

            if column == 0 {
                record.insert(SLUG_KEY, FieldValue::Text(slugify(cell)));
                record.insert(NAME_KEY, FieldValue::Text(cell.clone()));
            }
        }

        record
    }
}

fn is_reserved(header: &str) -> bool {
    header == SLUG_KEY || header == NAME_KEY
}

/// Reshapes the data rows of `grid` into records.
pub fn transform(grid: &Grid, options: &TransformOptions) -> Output {
    let Some(transformer) = RowTransformer::new(grid, options) else {
        tracing::warn!(
            "Header row {} is missing from a grid of {} rows",
            options.header_row,
            grid.len()
        );
        return Output::empty(options.shape);
    };

    let data_rows = grid.rows().iter().skip(options.data_start_row);

    match options.shape {
        OutputShape::List => Output::List(
            data_rows
                .map(|row| transformer.transform_row(row))
                .collect(),
        ),
        OutputShape::ByName => {
            let mut by_name = IndexMap::new();
            for row in data_rows {
                let name = row.first().cloned().unwrap_or_default();
                by_name.insert(name, transformer.transform_row(row));
            }
            Output::ByName(by_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>())
            .collect()
    }

    fn options() -> TransformOptions {
        TransformOptions {
            column_types: TypeConfig::new()
                .with(0, TypeTag::Text)
                .with(1, TypeTag::Number)
                .with(2, TypeTag::Boolean),
            data_start_row: 1,
            ..Default::default()
        }
    }

    fn records(output: Output) -> Vec<Record> {
        match output {
            Output::List(records) => records,
            Output::ByName(_) => panic!("expected list output"),
        }
    }

    #[test]
    fn test_record_count_matches_data_rows() {
        let grid = grid(&[
            &["Nom", "Effectif", "Public"],
            &["A", "10", "TRUE"],
            &["B"],
            &[],
            &["D", "1", "FALSE", "extra"],
        ]);
        let records = records(transform(&grid, &options()));
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_rows_before_start_are_skipped() {
        let grid = grid(&[
            &["Nom", "Effectif"],
            &["description", "how many"],
            &["A", "10"],
        ]);
        let options = TransformOptions {
            data_start_row: 2,
            ..options()
        };
        let records = records(transform(&grid, &options));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Nom"), Some(&FieldValue::from("A")));
    }

    #[test]
    fn test_keys_are_non_excluded_headers() {
        let grid = grid(&[&["Nom", "Titre", "Effectif", "Public"], &["A", "x", "3", "TRUE"]]);
        let options = TransformOptions {
            excluded_columns: BTreeSet::from([1]),
            column_types: TypeConfig::new()
                .with(0, TypeTag::Text)
                .with(1, TypeTag::Text)
                .with(2, TypeTag::Number)
                .with(3, TypeTag::Boolean),
            ..options()
        };
        let records = records(transform(&grid, &options));
        let keys: Vec<&str> = records[0].keys().collect();
        assert_eq!(keys, vec!["Nom", SLUG_KEY, NAME_KEY, "Effectif", "Public"]);
    }

    #[test]
    fn test_excluded_identity_column_has_no_slug() {
        let grid = grid(&[&["Nom", "Effectif"], &["A", "3"]]);
        let options = TransformOptions {
            excluded_columns: BTreeSet::from([0]),
            ..options()
        };
        let records = records(transform(&grid, &options));
        let keys: Vec<&str> = records[0].keys().collect();
        assert_eq!(keys, vec!["Effectif"]);
    }

    #[test]
    fn test_slug_and_name() {
        let grid = grid(&[&["Nom"], &["École Supérieure"]]);
        let records = records(transform(&grid, &options()));
        assert_eq!(
            records[0].get(SLUG_KEY),
            Some(&FieldValue::from("Ecole-Superieure"))
        );
        assert_eq!(
            records[0].get(NAME_KEY),
            Some(&FieldValue::from("École Supérieure"))
        );
    }

    #[test]
    fn test_name_header_does_not_replace_identity() {
        let grid = grid(&[&["Nom", "name", "slug"], &["École A", "short", "x"]]);
        let options = TransformOptions {
            column_types: TypeConfig::new()
                .with(0, TypeTag::Text)
                .with(1, TypeTag::Text)
                .with(2, TypeTag::Text),
            ..options()
        };
        let records = records(transform(&grid, &options));
        assert_eq!(records[0].get(NAME_KEY), Some(&FieldValue::from("École A")));
        assert_eq!(records[0].get(SLUG_KEY), Some(&FieldValue::from("Ecole-A")));
        assert_eq!(records[0].len(), 3);
    }

    #[test]
    fn test_identity_header_named_name_keeps_raw_value() {
        let grid = grid(&[&["name", "Effectif"], &["École A", "3"]]);
        let options = TransformOptions {
            column_types: TypeConfig::new()
                .with(0, TypeTag::List)
                .with(1, TypeTag::Number),
            ..options()
        };
        let records = records(transform(&grid, &options));
        let keys: Vec<&str> = records[0].keys().collect();
        assert_eq!(keys, vec![NAME_KEY, SLUG_KEY, "Effectif"]);
        assert_eq!(records[0].get(NAME_KEY), Some(&FieldValue::from("École A")));
    }

    #[test]
    fn test_name_header_kept_when_identity_excluded() {
        let grid = grid(&[&["Nom", "name"], &["École A", "short"]]);
        let options = TransformOptions {
            column_types: TypeConfig::new().with(1, TypeTag::Text),
            excluded_columns: BTreeSet::from([0]),
            ..options()
        };
        let records = records(transform(&grid, &options));
        assert_eq!(records[0].get(NAME_KEY), Some(&FieldValue::from("short")));
        assert_eq!(records[0].get(SLUG_KEY), None);
    }

    #[test]
    fn test_unknown_tag_leaves_field_absent() {
        let grid = grid(&[&["Nom", "Date"], &["A", "2024-01-01"]]);
        let options = TransformOptions {
            column_types: TypeConfig::new()
                .with(0, TypeTag::Text)
                .with(1, TypeTag::Unknown),
            ..options()
        };
        let records = records(transform(&grid, &options));
        assert_eq!(records[0].get("Date"), None);
        assert_eq!(records[0].len(), 3);
    }

    #[test]
    fn test_untyped_column_is_absent() {
        let grid = grid(&[&["Nom", "Effectif", "Public", "Notes"], &["A", "1", "TRUE", "hi"]]);
        let records = records(transform(&grid, &options()));
        assert_eq!(records[0].get("Notes"), None);
    }

    #[test]
    fn test_non_numeric_number_is_absent() {
        let grid = grid(&[&["Nom", "Effectif"], &["A", "n/a"]]);
        let records = records(transform(&grid, &options()));
        assert_eq!(records[0].get("Effectif"), None);
    }

    #[test]
    fn test_short_row_is_tolerated() {
        let grid = grid(&[&["Nom", "Effectif", "Public"], &["A"]]);
        let records = records(transform(&grid, &options()));
        assert_eq!(records[0].get("Effectif"), None);
        assert_eq!(records[0].get("Public"), None);
        assert_eq!(records[0].get("Nom"), Some(&FieldValue::from("A")));
    }

    #[test]
    fn test_cells_without_header_are_ignored() {
        let grid = grid(&[&["Nom"], &["A", "orphan"]]);
        let records = records(transform(&grid, &options()));
        assert_eq!(records[0].len(), 3);
    }

    #[test]
    fn test_type_row_supplies_missing_tags() {
        let grid = grid(&[
            &["Nom", "Effectif", "Villes"],
            &["text", "number", "list"],
            &["A", "12", "Paris, Lyon"],
        ]);
        let options = TransformOptions {
            column_types: TypeConfig::new().with(1, TypeTag::Text),
            type_row: Some(1),
            data_start_row: 2,
            ..Default::default()
        };
        let records = records(transform(&grid, &options));
        assert_eq!(records[0].get("Nom"), Some(&FieldValue::from("A")));
        // explicit configuration wins over the sheet's own tag
        assert_eq!(records[0].get("Effectif"), Some(&FieldValue::from("12")));
        assert_eq!(
            records[0].get("Villes"),
            Some(&FieldValue::List(vec!["Paris".into(), "Lyon".into()]))
        );
    }

    #[test]
    fn test_by_name_shape() {
        let grid = grid(&[&["Nom", "Effectif"], &["A", "1"], &["B", "2"], &["A", "3"]]);
        let options = TransformOptions {
            shape: OutputShape::ByName,
            ..options()
        };
        let Output::ByName(by_name) = transform(&grid, &options) else {
            panic!("expected by_name output");
        };
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name["A"].get("Effectif"), Some(&FieldValue::Number(3)));
        assert_eq!(by_name["B"].get("Effectif"), Some(&FieldValue::Number(2)));
    }

    #[test]
    fn test_missing_header_row_yields_empty_output() {
        let grid = Grid::default();
        let output = transform(&grid, &options());
        assert_eq!(output, Output::List(vec![]));
    }
}
