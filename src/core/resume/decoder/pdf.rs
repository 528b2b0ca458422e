//! PDF decoding via `pdf-extract`.
//!
//! `pdf_extract::extract_text` only accepts a file path, so bytes are spooled
//! to a temp file first — the teacher's `ResumeParser::parse_pdf` works
//! directly against a caller-supplied path; here the pipeline hands us bytes
//! (already retrieved from the blob store), so we recreate that entry point
//! locally rather than widening the decoder's public signature per format.

use anyhow::{Context, Result};
use std::io::Write;

pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut tmp = tempfile::NamedTempFile::new().context("failed to create temp file for PDF extraction")?;
    tmp.write_all(bytes).context("failed to write PDF bytes to temp file")?;
    tmp.flush().context("failed to flush PDF temp file")?;

    let text = pdf_extract::extract_text(tmp.path())
        .context("pdf_extract failed to extract text")?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_rejects_garbage_bytes() {
        let result = extract_text(b"not a pdf");
        assert!(result.is_err());
    }
}
