//! Text Extractor — turns an uploaded PDF résumé into plain text.
//!
//! Wraps the pdf-extract crate. A PDF with no extractable text layer (a pure
//! image scan) is reported as an error so callers never analyze an empty
//! résumé by accident.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is not a parseable PDF: {0}")]
    Unreadable(String),

    #[error("no extractable text layer found in the document")]
    NoTextLayer,
}

/// Extracts the concatenated page text from a PDF payload, page order preserved.
pub fn extract_resume_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(pdf_bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
    ensure_text_layer(text)
}

/// Rejects extraction output that contains no visible characters.
fn ensure_text_layer(text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::NoTextLayer);
    }
    Ok(text)
}
