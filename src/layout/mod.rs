//! Module directory layout: symbolic urls and exclusion computation.

pub mod exclude;
pub mod urls;

pub use exclude::excluded_directories;
pub use urls::{jar_url, module_file_url, slash_path, MODULE_DIR_URL};
