//! DOCX text extraction
//!
//! A .docx file is a ZIP archive with the document body in
//! word/document.xml. Text runs (`w:t`) are collected and paragraphs are
//! joined with newlines.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractError;

/// Extract the paragraph text of a DOCX document
pub fn extract(data: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    parse_document_xml(&xml)
}

/// Pull text out of the WordprocessingML body
fn parse_document_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::Docx(e.to_string()))?;

        match event {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run = true,
            Event::End(e) if e.local_name().as_ref() == b"t" => in_run = false,
            Event::End(e) if e.local_name().as_ref() == b"p" => text.push('\n'),
            Event::Text(t) if in_run => {
                let chunk = t.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                text.push_str(&chunk);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

// ============================================================================
// Tests
// ============================================================================
