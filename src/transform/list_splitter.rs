const PLAIN_SEPARATOR: &str = ", ";

/// Splits a list cell into its items.
///
/// Cells containing a `"` are scanned so that commas inside quoted spans stay
/// part of the item. Other cells are split on `", "`.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    if raw.contains('"') {
        split_quoted(raw)
    } else {
        raw.split(PLAIN_SEPARATOR).map(str::to_owned).collect()
    }
}

fn split_quoted(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in raw.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => items.push(std::mem::take(&mut current)),
            ' ' if current.is_empty() => {}
            _ => current.push(c),
        }
    }
    items.push(current);

    items
}
