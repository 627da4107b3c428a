//! Filesystem storage for uploads and converted files.

mod error;
mod layout;
mod naming;
mod retention;

pub use error::StorageError;
pub use layout::{RequestDir, StorageLayout};
pub use naming::{converted_filename, is_safe_download_name, sanitize_filename};
pub use retention::RetentionSweeper;
