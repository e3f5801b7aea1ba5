use tower_lsp::lsp_types::{Position, Range};

use crate::language::LanguageId;

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    pub language: LanguageId, // From didOpen; drives parser selection and save filtering
}

/// Range spanning the whole document, with the end position expressed in
/// UTF-16 code units as the protocol requires.
pub fn full_document_range(text: &str) -> Range {
    let mut line = 0u32;
    let mut last_line_start = 0usize;

    for (idx, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            line += 1;
            last_line_start = idx + 1;
        }
    }

    let character = text[last_line_start..].encode_utf16().count() as u32;

    Range {
        start: Position::new(0, 0),
        end: Position::new(line, character),
    }
}
