//! Deserializers for settings that may arrive either typed (from a config file)
//! or as plain strings (from `SCHOOLS_EXPORT__*` environment variables).

use std::collections::BTreeSet;

use serde::{de::Error, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Index {
    Number(usize),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Indices {
    One(Index),
    Many(Vec<Index>),
}

fn parse_index(text: &str) -> Result<usize, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("expected a column index, got {:?}", text))
}

/// Accepts `4` or `"4"`.
pub fn index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    match Index::deserialize(deserializer)? {
        Index::Number(index) => Ok(index),
        Index::Text(text) => parse_index(&text).map_err(D::Error::custom),
    }
}

/// Like [`index`]; an empty string means unset.
pub fn optional_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Index>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Index::Number(index)) => Ok(Some(index)),
        Some(Index::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Index::Text(text)) => parse_index(&text).map(Some).map_err(D::Error::custom),
    }
}

/// Accepts `[2, 3]`, `["2", "3"]`, `3` or `"2,3"`.
pub fn column_set<'de, D>(deserializer: D) -> Result<BTreeSet<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Indices::deserialize(deserializer)? {
        Indices::One(item) => vec![item],
        Indices::Many(items) => items,
    };

    let mut columns = BTreeSet::new();
    for item in items {
        match item {
            Index::Number(index) => {
                columns.insert(index);
            }
            Index::Text(text) => {
                for part in text.split(',').filter(|part| !part.trim().is_empty()) {
                    columns.insert(parse_index(part).map_err(D::Error::custom)?);
                }
            }
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Deserialize, Debug)]
    struct Layout {
        #[serde(deserialize_with = "index")]
        start: usize,
        #[serde(default, deserialize_with = "optional_index")]
        types: Option<usize>,
        #[serde(default, deserialize_with = "column_set")]
        excluded: BTreeSet<usize>,
    }

    fn layout(value: serde_json::Value) -> Result<Layout, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_typed_values() {
        let layout = layout(json!({ "start": 4, "types": 1, "excluded": [2, 3] })).unwrap();
        assert_eq!(layout.start, 4);
        assert_eq!(layout.types, Some(1));
        assert_eq!(layout.excluded, BTreeSet::from([2, 3]));
    }

    #[test]
    fn test_string_values() {
        let layout = layout(json!({ "start": " 2", "types": "", "excluded": "2, 3,8" })).unwrap();
        assert_eq!(layout.start, 2);
        assert_eq!(layout.types, None);
        assert_eq!(layout.excluded, BTreeSet::from([2, 3, 8]));
    }

    #[test]
    fn test_single_and_mixed_columns() {
        assert_eq!(
            layout(json!({ "start": 0, "excluded": 5 })).unwrap().excluded,
            BTreeSet::from([5])
        );
        assert_eq!(
            layout(json!({ "start": 0, "excluded": ["1", 2] })).unwrap().excluded,
            BTreeSet::from([1, 2])
        );
        assert!(layout(json!({ "start": 0 })).unwrap().excluded.is_empty());
    }

    #[test]
    fn test_rejects_non_indices() {
        assert!(layout(json!({ "start": "four" })).is_err());
        assert!(layout(json!({ "start": -1 })).is_err());
        assert!(layout(json!({ "start": 0, "excluded": "2,x" })).is_err());
    }
}
