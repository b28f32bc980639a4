//! # Utility modules
//!
//! - `url` - URL inspection helpers shared by the rewriters

pub mod url;

// Re-export commonly used items for convenience
pub use self::url::{is_root_relative, path_with_query_and_fragment, Url};
