//! Legacy binary `.doc` (OLE2 / Compound File Binary) decoding.
//!
//! No crate in the reference pack parses the Word binary format itself,
//! and no full implementation exists on crates.io either — only a real
//! container reader (`cfb`) for the underlying Compound File Binary format.
//! We read the `WordDocument` stream out of the container and then recover
//! text with the same heuristic real-world tools like antiword/catdoc use:
//! scan for runs of printable UTF-16LE code units, since the bulk of a
//! `.doc` file's readable text lives in such runs even without parsing the
//! FIB (File Information Block) and character-formatting tables in full.

use anyhow::{Context, Result};
use std::io::{Cursor, Read};

const MIN_RUN_LEN: usize = 4;

pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let cursor = Cursor::new(bytes);
    let mut file = cfb::CompoundFile::open(cursor).context("not a valid OLE2 compound file")?;

    let mut stream = file
        .open_stream("WordDocument")
        .context("compound file has no WordDocument stream")?;

    let mut data = Vec::new();
    stream
        .read_to_end(&mut data)
        .context("failed to read WordDocument stream")?;

    Ok(scan_utf16le_text(&data))
}

/// Scan `data` for runs of printable UTF-16LE code units and join them with
/// newlines. A "printable" unit is ASCII 0x20-0x7E, a handful of common
/// Latin-1 punctuation code points, or 0x0D/0x0A (paragraph marks in the
/// legacy format map roughly to CR).
fn scan_utf16le_text(data: &[u8]) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();

    let mut i = 0;
    while i + 1 < data.len() {
        let unit = u16::from_le_bytes([data[i], data[i + 1]]);
        i += 2;

        match unit {
            0x0D | 0x07 => {
                flush_run(&mut current, &mut lines);
            }
            0x20..=0x7E => {
                if let Some(ch) = char::from_u32(u32::from(unit)) {
                    current.push(ch);
                }
            }
            _ => {
                flush_run(&mut current, &mut lines);
            }
        }
    }
    flush_run(&mut current, &mut lines);

    lines.join("\n")
}

fn flush_run(current: &mut String, lines: &mut Vec<String>) {
    let trimmed = current.trim();
    if trimmed.len() >= MIN_RUN_LEN {
        lines.push(trimmed.to_string());
    }
    current.clear();
}
