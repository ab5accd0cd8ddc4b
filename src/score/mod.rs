//! Relevance scoring and subsection refinement.

mod refine;
mod section;

pub use refine::{refine_section, RefinedPassage, RefineOptions};
pub use section::{score_section, score_text};
