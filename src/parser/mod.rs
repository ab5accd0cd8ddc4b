//! PDF parsing and text extraction.

mod layout;
mod options;
mod pdf_parser;

pub use layout::{FontStatistics, TextLine, TextSpan};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
