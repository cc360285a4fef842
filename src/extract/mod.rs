//! Document text extraction
//!
//! Extracts plain text from uploaded documents so they can be fingerprinted.
//! Supported formats: plain text, PDF, and DOCX. Extraction failures are
//! recoverable errors; the upload is rejected and nothing is recorded.

mod docx;
mod pdf;

/// MIME type for DOCX documents
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// ============================================================================
// Document Kind
// ============================================================================

/// Supported document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolve a kind from a MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "text/plain" => Some(Self::PlainText),
            "application/pdf" => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }

    /// Resolve a kind from the declared MIME type, falling back to a guess
    /// from the file extension when the declared type is missing or generic
    pub fn detect(file_name: &str, declared_mime: Option<&str>) -> Option<Self> {
        if let Some(mime) = declared_mime {
            if let Some(kind) = Self::from_mime(mime) {
                return Some(kind);
            }
            // Browsers often declare octet-stream for anything unusual;
            // anything else declared is genuinely unsupported.
            if mime != "application/octet-stream" {
                return None;
            }
        }

        let guessed = mime_guess::from_path(file_name).first_raw()?;
        Self::from_mime(guessed)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Extraction errors. All of these are recoverable: the client is told the
/// document could not be read and may try another file.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("File is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("Failed to read PDF file: {0}")]
    Pdf(String),

    #[error("Failed to read Word file: {0}")]
    Docx(String),
}

// ============================================================================
// Extraction
// ============================================================================

/// Extract plain text from a document
pub fn extract_text(kind: DocumentKind, data: &[u8]) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::PlainText => std::str::from_utf8(data)
            .map(str::to_owned)
            .map_err(|_| ExtractError::InvalidUtf8),
        DocumentKind::Pdf => pdf::extract(data),
        DocumentKind::Docx => docx::extract(data),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_declared_mime() {
        assert_eq!(
            DocumentKind::detect("whatever.bin", Some("text/plain")),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::detect("report", Some("application/pdf")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect("report", Some(DOCX_MIME)),
            Some(DocumentKind::Docx)
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::detect("report.txt", None),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::detect("report.pdf", Some("application/octet-stream")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect("report.docx", None),
            Some(DocumentKind::Docx)
        );
    }

    #[test]
    fn test_detect_rejects_unsupported() {
        assert_eq!(DocumentKind::detect("image.png", Some("image/png")), None);
        assert_eq!(DocumentKind::detect("archive.tar", None), None);
        assert_eq!(DocumentKind::detect("noextension", None), None);
    }

    #[test]
    fn test_plain_text_extraction() {
        let text = extract_text(DocumentKind::PlainText, "Hello   world".as_bytes()).unwrap();
        assert_eq!(text, "Hello   world");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let result = extract_text(DocumentKind::PlainText, &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(ExtractError::InvalidUtf8)));
    }
}
