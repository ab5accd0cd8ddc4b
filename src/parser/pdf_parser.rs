//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::detect_version_from_path;
use crate::error::{Error, Result};
use crate::model::{ContentLine, DocumentContent, DocumentInfo};

use super::layout::LayoutAnalyzer;
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
    filename: String,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF before handing it to lopdf
        detect_version_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled.pdf".to_string());

        Ok(Self {
            doc,
            options,
            filename,
        })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Ok(Self {
            doc,
            options,
            filename: "untitled.pdf".to_string(),
        })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Override the filename recorded in the extracted content.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Extract the document content: metadata plus text lines in reading
    /// order with page and font information.
    pub fn parse(&self) -> Result<DocumentContent> {
        let mut content = DocumentContent::new(self.extract_info()?);

        let analyzer = LayoutAnalyzer::new(&self.doc);
        let page_ids = self.doc.get_pages();
        content.info.page_count = page_ids.len() as u32;

        for page_num in page_ids.keys().copied() {
            match analyzer.extract_page_lines(page_num) {
                Ok(lines) => {
                    for line in lines {
                        let text = line.text();
                        if text.trim().is_empty() {
                            continue;
                        }
                        content.add_line(
                            ContentLine::new(text.trim().to_string(), page_num)
                                .with_font_size(line.font_size)
                                .with_bold(line.is_bold()),
                        );
                    }
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    // Lenient: fall back to plain text extraction so the
                    // page is not lost entirely
                    log::warn!(
                        "Layout extraction failed for page {} of {}: {}, falling back to plain text",
                        page_num,
                        self.filename,
                        e
                    );
                    self.extract_page_text_fallback(page_num, &mut content);
                }
            }
        }

        Ok(content)
    }

    /// Plain text fallback for a page whose content stream could not be
    /// walked. Lines carry default font metadata and never classify as
    /// style-based headings.
    fn extract_page_text_fallback(&self, page_num: u32, content: &mut DocumentContent) {
        match self.doc.extract_text(&[page_num]) {
            Ok(text) => {
                for line in text.lines() {
                    let line = line.trim();
                    if !line.is_empty() {
                        content.add_line(ContentLine::new(line.to_string(), page_num));
                    }
                }
            }
            Err(e) => {
                log::warn!(
                    "Plain text extraction also failed for page {} of {}: {}",
                    page_num,
                    self.filename,
                    e
                );
            }
        }
    }

    /// Extract document metadata from the Info dictionary.
    fn extract_info(&self) -> Result<DocumentInfo> {
        let mut info = DocumentInfo::new(self.filename.clone(), self.doc.version.to_string());

        if let Ok(info_obj) = self.doc.trailer.get(b"Info") {
            if let Ok(info_ref) = info_obj.as_reference() {
                if let Ok(info_dict) = self.doc.get_dictionary(info_ref) {
                    info.title = get_string_from_dict(info_dict, b"Title");
                }
            }
        }

        info.encrypted = self.doc.is_encrypted();

        Ok(info)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        lopdf::Object::String(bytes, _) => {
            // UTF-16BE first (PDF standard for Unicode)
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks(2)
                    .filter_map(|c| {
                        if c.len() == 2 {
                            Some(u16::from_be_bytes([c[0], c[1]]))
                        } else {
                            None
                        }
                    })
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_invalid() {
        let result = PdfParser::from_bytes(b"not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_bytes_empty() {
        let data: [u8; 0] = [];
        let result = PdfParser::from_bytes(&data);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_string_from_dict() {
        let mut dict = lopdf::Dictionary::new();
        dict.set(
            "Title",
            lopdf::Object::String(
                b"Annual Report".to_vec(),
                lopdf::StringFormat::Literal,
            ),
        );
        assert_eq!(
            get_string_from_dict(&dict, b"Title"),
            Some("Annual Report".to_string())
        );
        assert_eq!(get_string_from_dict(&dict, b"Author"), None);
    }
}
