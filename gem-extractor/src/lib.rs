pub mod classify;
pub mod document;
pub mod run;

pub use classify::is_gem;
pub use document::{render_gem, sanitize_title, DocumentWriter};
pub use run::{extract_gems, GemExtractor};
