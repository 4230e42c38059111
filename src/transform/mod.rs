pub mod coerce;
pub mod list_splitter;
pub mod record;
pub mod row_transformer;
pub mod slug;
pub mod type_config;
pub mod type_tag;

pub use record::{FieldValue, Output, OutputShape, Record};
pub use row_transformer::{transform, TransformOptions};
pub use type_config::TypeConfig;
pub use type_tag::TypeTag;
