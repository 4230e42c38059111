use super::{list_splitter::split_list, record::FieldValue, type_tag::TypeTag};

/// Coerces a raw cell into the value its column declares.
///
/// Returns `None` when the tag is unknown or a number cell holds no leading
/// integer. Coercion never fails the export.
pub fn coerce(raw: &str, tag: TypeTag) -> Option<FieldValue> {
    match tag {
        TypeTag::Text => Some(FieldValue::Text(raw.to_owned())),
        TypeTag::Number => parse_leading_integer(raw).map(FieldValue::Number),
        TypeTag::Boolean => Some(FieldValue::Boolean(raw == "TRUE")),
        TypeTag::List => Some(FieldValue::List(split_list(raw))),
        TypeTag::Unknown => None,
    }
}

/// Reads an optionally signed run of ASCII digits after any leading
/// whitespace, ignoring whatever follows it.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return None;
    }

    trimmed[..sign_len + digits_len].parse().ok()
}
