pub mod clipboard;
pub mod download;
pub mod files;
pub mod text;
pub mod ui;
pub mod upload;
