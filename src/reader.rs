//! Tolerant, bounded file reading.
//!
//! Bytes that are not valid UTF-8 are dropped while decoding, so a corrupt
//! byte never aborts a scan. Whole-document reads stop at a character budget
//! and report `BoundedRead::TooLarge` instead of handing back a truncated
//! prefix.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Result, TextGuardError};

/// Character budget for whole-document scans. A read that reaches this many
/// characters is rejected, so the largest accepted file holds one less.
pub const MAX_CHARACTERS_SCANNED: usize = 500_001;

const READ_CHUNK_BYTES: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundedRead {
    Content(String),
    TooLarge,
}

impl BoundedRead {
    #[must_use]
    pub fn into_content(self) -> Option<String> {
        match self {
            Self::Content(content) => Some(content),
            Self::TooLarge => None,
        }
    }
}

/// Read `reader` to a string, giving up with `TooLarge` once `max_chars`
/// characters have been decoded.
///
/// # Errors
/// Returns an error if the underlying reader fails.
pub fn read_bounded(mut reader: impl Read, max_chars: usize) -> std::io::Result<BoundedRead> {
    let mut content = String::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut chars = 0usize;
    let mut chunk = vec![0u8; READ_CHUNK_BYTES];

    loop {
        let n = reader.read(&mut chunk)?;
        let eof = n == 0;
        pending.extend_from_slice(&chunk[..n]);
        let decoded = decode_tolerant(&mut pending, &mut content, eof);
        chars += decoded;
        if chars >= max_chars {
            return Ok(BoundedRead::TooLarge);
        }
        if eof {
            return Ok(BoundedRead::Content(content));
        }
    }
}

/// Read the file at `path` with [`read_bounded`].
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn read_file_bounded(path: &Path, max_chars: usize) -> Result<BoundedRead> {
    let file = std::fs::File::open(path).map_err(|e| TextGuardError::file_read(path, e))?;
    read_bounded(BufReader::new(file), max_chars).map_err(|e| TextGuardError::file_read(path, e))
}

/// Decode as much of `pending` as possible into `out`, dropping malformed
/// sequences. An incomplete sequence at the end is kept for the next call
/// unless `eof` is set. Returns the number of characters appended.
pub fn decode_tolerant(pending: &mut Vec<u8>, out: &mut String, eof: bool) -> usize {
    let mut appended = 0usize;
    let mut carry = Vec::new();
    let mut chunks = pending.utf8_chunks().peekable();

    while let Some(chunk) = chunks.next() {
        let valid = chunk.valid();
        appended += valid.chars().count();
        out.push_str(valid);

        let invalid = chunk.invalid();
        if !eof && chunks.peek().is_none() && is_incomplete_sequence(invalid) {
            carry = invalid.to_vec();
        }
    }

    *pending = carry;
    appended
}

/// True if `bytes` is the start of a multi-byte sequence cut off early,
/// as opposed to bytes that can never be valid.
fn is_incomplete_sequence(bytes: &[u8]) -> bool {
    !bytes.is_empty() && std::str::from_utf8(bytes).is_err_and(|e| e.error_len().is_none())
}

/// Line iterator that drops malformed bytes and strips `\n` / `\r\n`.
pub struct TolerantLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> TolerantLines<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for TolerantLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                let mut line = String::with_capacity(self.buf.len());
                decode_tolerant(&mut self.buf, &mut line, true);
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open `path` for tolerant line-by-line reading.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn tolerant_lines(path: &Path) -> Result<TolerantLines<BufReader<std::fs::File>>> {
    let file = std::fs::File::open(path).map_err(|e| TextGuardError::file_read(path, e))?;
    Ok(TolerantLines::new(BufReader::new(file)))
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
