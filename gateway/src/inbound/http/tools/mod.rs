//! Tool-style endpoints under `/tools`.

pub mod catalogue;
pub mod content;
pub mod search;

pub use catalogue::{force_refresh, get_error_taxonomy, get_source_metadata};
pub use content::{get_content_by_id, get_content_by_path};
pub use search::search_guidance;
