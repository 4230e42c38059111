pub mod config;
pub mod output;
pub mod prettyprint;
pub mod routines;
pub mod sheets;
pub mod transform;

pub use routines::run_export;
