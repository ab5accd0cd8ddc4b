//! Layout analysis for PDF pages.
//!
//! Extracts text with position and font information from content streams,
//! then groups spans into baseline-aligned lines. Font size statistics
//! collected here feed heading detection during segmentation.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// A text span with position and style information.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let lower = font_name.to_lowercase();
        let is_bold =
            lower.contains("bold") || lower.contains("black") || lower.contains("heavy");

        Self {
            text,
            x,
            y,
            font_size,
            font_name,
            is_bold,
        }
    }
}

/// A text line composed of multiple spans on the same baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
    /// Dominant font size in this line
    pub font_size: f32,
}

impl TextLine {
    /// Create a new text line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        if spans.is_empty() {
            return Self {
                spans: vec![],
                y: 0.0,
                font_size: 0.0,
            };
        }

        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted_size: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted_size / total_chars as f32
        } else {
            spans[0].font_size
        };

        let y = spans[0].y;

        Self {
            spans,
            y,
            font_size,
        }
    }

    /// Combined text of all spans, inserting spaces at X gaps.
    ///
    /// No space is inserted between adjacent characters of spaceless
    /// scripts (Chinese, Japanese).
    pub fn text(&self) -> String {
        if self.spans.is_empty() {
            return String::new();
        }

        if self.spans.len() == 1 {
            return self.spans[0].text.clone();
        }

        let mut result = String::new();

        for (i, span) in self.spans.iter().enumerate() {
            if i == 0 {
                result.push_str(&span.text);
                continue;
            }

            let prev_span = &self.spans[i - 1];

            // Rough end of the previous span: its start plus an estimated
            // width of half the font size per character.
            let prev_end =
                prev_span.x + prev_span.text.chars().count() as f32 * prev_span.font_size * 0.5;
            let gap = span.x - prev_end;
            let space_threshold = span.font_size * 0.1;

            let prev_last_char = prev_span.text.chars().last();
            let curr_first_char = span.text.chars().next();

            let should_insert_space = if gap > space_threshold {
                let prev_is_spaceless = prev_last_char
                    .map(is_spaceless_script_char)
                    .unwrap_or(false);
                let curr_is_spaceless = curr_first_char
                    .map(is_spaceless_script_char)
                    .unwrap_or(false);
                !(prev_is_spaceless && curr_is_spaceless)
            } else {
                false
            };

            let prev_ends_with_space =
                prev_span.text.ends_with(' ') || prev_span.text.ends_with('\u{00A0}');
            let curr_starts_with_space =
                span.text.starts_with(' ') || span.text.starts_with('\u{00A0}');

            if should_insert_space && !prev_ends_with_space && !curr_starts_with_space {
                result.push(' ');
            }

            result.push_str(&span.text);
        }

        result
    }

    /// Check if the line is predominantly bold.
    pub fn is_bold(&self) -> bool {
        let bold_chars: usize = self
            .spans
            .iter()
            .filter(|s| s.is_bold)
            .map(|s| s.text.len())
            .sum();
        let total_chars: usize = self.spans.iter().map(|s| s.text.len()).sum();
        total_chars > 0 && bold_chars as f32 / total_chars as f32 > 0.5
    }
}

/// Font size statistics for a document, used for heading detection.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Body text font size (most common)
    body_size: f32,
    /// All observed font sizes with frequency, keyed at 0.1pt precision
    size_histogram: HashMap<i32, usize>,
}

impl FontStatistics {
    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        let key = (size * 10.0) as i32;
        *self.size_histogram.entry(key).or_insert(0) += 1;
    }

    /// Determine the body text size from the histogram.
    pub fn analyze(&mut self) {
        if self.size_histogram.is_empty() {
            self.body_size = 12.0;
            return;
        }

        // Ties on frequency resolve to the larger size so the result does
        // not depend on hash iteration order
        let body_key = self
            .size_histogram
            .iter()
            .max_by_key(|(key, count)| (**count, **key))
            .map(|(k, _)| *k)
            .unwrap_or(120);
        self.body_size = body_key as f32 / 10.0;
    }

    /// The dominant body text size in points.
    pub fn body_size(&self) -> f32 {
        if self.body_size > 0.0 {
            self.body_size
        } else {
            12.0
        }
    }

    /// Whether a font size is noticeably larger than body text.
    pub fn is_larger_than_body(&self, font_size: f32) -> bool {
        font_size > self.body_size() + 0.5
    }
}

/// Layout analyzer for extracting structured text from PDF pages.
pub struct LayoutAnalyzer<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> LayoutAnalyzer<'a> {
    /// Create a new layout analyzer.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract the lines of a page in reading order.
    pub fn extract_page_lines(&self, page_num: u32) -> Result<Vec<TextLine>> {
        let spans = self.extract_page_spans(page_num)?;
        Ok(group_spans_into_lines(spans))
    }

    /// Extract text spans from a page with position and font information.
    /// Uses lopdf's font encoding support for proper text decoding.
    fn extract_page_spans(&self, page_num: u32) -> Result<Vec<TextSpan>> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let lopdf_fonts = self
            .doc
            .get_page_fonts(*page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // Map resource font names to base font names
        let mut fonts = HashMap::new();
        for (name, font) in &lopdf_fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            fonts.insert(name.clone(), base_font);
        }

        let content = self.get_page_content(*page_id)?;
        self.parse_content_stream(&content, &fonts, &lopdf_fonts)
    }

    /// Get page content stream, concatenating stream arrays.
    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Walk the content stream operators and collect positioned spans.
    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &HashMap<Vec<u8>, String>,
        lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut current_font = String::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut text_matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    text_matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                            if let Some(base) = fonts.get(font_name.as_slice()) {
                                current_font = base.clone();
                            } else {
                                current_font =
                                    String::from_utf8_lossy(font_name.as_slice()).to_string();
                            }
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        text_matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        text_matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    text_matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if in_text_block {
                        let encoding = lopdf_fonts
                            .get(&current_font_name)
                            .and_then(|f| f.get_font_encoding(self.doc).ok());

                        let text = if op.operator == "TJ" {
                            // TJ: array of strings and kerning adjustments in
                            // 1/1000 text space units; large negative values
                            // indicate word spaces
                            if let Some(Object::Array(arr)) = op.operands.first() {
                                let mut combined = String::new();
                                let space_threshold = 200.0;

                                for item in arr {
                                    match item {
                                        Object::String(bytes, _) => {
                                            if let Some(ref enc) = encoding {
                                                if let Ok(decoded) =
                                                    LopdfDocument::decode_text(enc, bytes)
                                                {
                                                    combined.push_str(&decoded);
                                                }
                                            } else {
                                                combined.push_str(&decode_text_simple(bytes));
                                            }
                                        }
                                        Object::Integer(n) => {
                                            let adjustment = -(*n as f32);
                                            if adjustment > space_threshold {
                                                push_word_space(&mut combined);
                                            }
                                        }
                                        Object::Real(n) => {
                                            let adjustment = -n;
                                            if adjustment > space_threshold {
                                                push_word_space(&mut combined);
                                            }
                                        }
                                        _ => {}
                                    }
                                }
                                combined
                            } else {
                                String::new()
                            }
                        } else {
                            // Tj: single string
                            if let Some(Object::String(bytes, _)) = op.operands.first() {
                                if let Some(ref enc) = encoding {
                                    LopdfDocument::decode_text(enc, bytes).unwrap_or_default()
                                } else {
                                    decode_text_simple(bytes)
                                }
                            } else {
                                String::new()
                            }
                        };

                        if !text.trim().is_empty() {
                            let (x, y) = text_matrix.get_position();
                            let effective_size = current_font_size * text_matrix.get_scale();
                            spans.push(TextSpan::new(
                                text,
                                x,
                                y,
                                effective_size,
                                current_font.clone(),
                            ));
                        }
                    }
                }
                "'" | "\"" => {
                    text_matrix.next_line();
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let encoding = lopdf_fonts
                                .get(&current_font_name)
                                .and_then(|f| f.get_font_encoding(self.doc).ok());

                            let text = if let Some(ref enc) = encoding {
                                LopdfDocument::decode_text(enc, bytes).unwrap_or_default()
                            } else {
                                decode_text_simple(bytes)
                            };

                            if !text.trim().is_empty() {
                                let (x, y) = text_matrix.get_position();
                                let effective_size = current_font_size * text_matrix.get_scale();
                                spans.push(TextSpan::new(
                                    text,
                                    x,
                                    y,
                                    effective_size,
                                    current_font.clone(),
                                ));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }
}

/// Append a word space unless the text already ends with one or the script
/// does not use spaces.
fn push_word_space(combined: &mut String) {
    if combined.is_empty() || combined.ends_with(' ') || combined.ends_with('\u{00A0}') {
        return;
    }
    if let Some(c) = combined.chars().last() {
        if !is_spaceless_script_char(c) {
            combined.push(' ');
        }
    }
}

/// Group spans into lines based on baseline Y position.
fn group_spans_into_lines(spans: Vec<TextSpan>) -> Vec<TextLine> {
    if spans.is_empty() {
        return vec![];
    }

    // Sort spans by Y (descending, since PDF Y is bottom-up) then X
    let mut spans = spans;
    spans.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_line_spans: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let y_tolerance = span.font_size * 0.3;

        if let Some(y) = current_y {
            if (span.y - y).abs() <= y_tolerance {
                current_line_spans.push(span);
            } else {
                if !current_line_spans.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(
                        &mut current_line_spans,
                    )));
                }
                current_y = Some(span.y);
                current_line_spans.push(span);
            }
        } else {
            current_y = Some(span.y);
            current_line_spans.push(span);
        }
    }

    if !current_line_spans.is_empty() {
        lines.push(TextLine::from_spans(current_line_spans));
    }

    lines
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default line leading (could be set by TL operator)
        self.f -= 12.0 * self.d;
    }

    fn get_position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn get_scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words; Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2A6DF).contains(&code)
    // Hiragana
    || (0x3040..=0x309F).contains(&code)
    // Katakana
    || (0x30A0..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
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
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
