//! Document Decoder
//!
//! Dispatches on file extension to produce a single UTF-8 text body with hard
//! line breaks preserved. Each format module owns its own extraction quirks;
//! this module only does extension dispatch and the common text cleanup pass.

mod doc;
mod docx;
mod pdf;

use crate::core::resume::types::DecodedDocument;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Formats the decoder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Doc,
}

impl ResumeFormat {
    /// Resolve a format from a filename's extension. Returns `None` for any
    /// extension outside `{pdf, docx, doc}` — callers map that to
    /// `PipelineError::UnsupportedFormat`.
    #[must_use]
    pub fn from_extension(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)?;
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            _ => None,
        }
    }
}

/// Decode raw bytes into line-aware UTF-8 text. Extraction failure is
/// surfaced as `Err`; the pipeline entry point downgrades that to a warning
/// and continues with empty text (`ExtractionFailed` is internal-only).
pub fn decode(format: ResumeFormat, bytes: &[u8]) -> Result<DecodedDocument> {
    let text = match format {
        ResumeFormat::Pdf => pdf::extract_text(bytes).context("failed to extract PDF text")?,
        ResumeFormat::Docx => docx::extract_text(bytes).context("failed to extract DOCX text")?,
        ResumeFormat::Doc => doc::extract_text(bytes).context("failed to extract DOC text")?,
    };

    if text.trim().is_empty() {
        bail!("decoded document contained no extractable text");
    }

    Ok(DecodedDocument {
        text: clean_text(&text),
        warning: None,
    })
}

/// Trim each line, drop empties, collapse runs of 3+ blank lines to 2 — mirrors
/// the teacher's `ResumeParser::clean_text` but preserves paragraph breaks
/// instead of collapsing everything to single newlines, since the experience
/// and education extractors are line-window based and need blank-line
/// boundaries to detect entry ends.
fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run <= 2 {
                out.push('\n');
            }
            continue;
        }
        blank_run = 0;
        out.push_str(trimmed);
        out.push('\n');
    }

    out.trim().to_string()
}
