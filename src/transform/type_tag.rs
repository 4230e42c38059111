use std::fmt::Formatter;

/// Coercion target declared for a column.
///
/// Anything that is not one of the four known tags becomes [`TypeTag::Unknown`],
/// which coerces every cell to an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeTag {
    Text,
    Number,
    Boolean,
    List,
    #[default]
    Unknown,
}

impl TypeTag {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "text" => TypeTag::Text,
            "number" => TypeTag::Number,
            "boolean" => TypeTag::Boolean,
            "list" => TypeTag::List,
            _ => TypeTag::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Text => "text",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::List => "list",
            TypeTag::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
