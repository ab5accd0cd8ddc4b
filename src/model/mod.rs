//! Data model for extracted document content.

mod document;
mod section;

pub use document::{ContentLine, DocumentContent, DocumentInfo};
pub use section::Section;
