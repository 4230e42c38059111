pub mod auth;
pub mod grid;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
