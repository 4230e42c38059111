use serde_json::Value;

/// Raw cells of a spreadsheet range, row-major.
///
/// The Sheets API drops trailing empty cells, so rows may be shorter than the
/// header and may even be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid(Vec<Vec<String>>);

impl Grid {
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.0.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Vec<String>> for Grid {
    fn from_iter<T: IntoIterator<Item = Vec<String>>>(iter: T) -> Self {
        Grid(iter.into_iter().collect())
    }
}

pub trait IntoGrid {
    fn into_grid(self) -> Grid;
}

impl IntoGrid for Vec<Vec<Value>> {
    fn into_grid(self) -> Grid {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
