pub mod classify;
pub mod listing;
pub mod naming;

pub use listing::{format_file_size, list_files, FileEntry};
