pub mod app_config;
mod lenient;
pub mod output_config;
pub mod sheets_config;
pub mod transform_config;
