#[allow(clippy::module_inception)]
pub mod prettyprint;

pub use prettyprint::PrettyFormatter;
