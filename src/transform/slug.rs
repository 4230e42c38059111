use unicode_normalization::UnicodeNormalization;

/// Builds the identifier of a school from its display name: diacritics are
/// stripped and spaces become hyphens.
pub fn slugify(name: &str) -> String {
    name.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}
