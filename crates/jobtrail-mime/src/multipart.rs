//! Multipart body splitting (RFC 2046 §5.1).
//!
//! Splits a multipart body into its immediate parts. Nested multipart parts
//! are returned as-is; callers descend by splitting their bodies again.

use crate::error::{Error, Result};
use crate::message::Part;

/// Splits a multipart body on `boundary`.
///
/// The preamble before the first delimiter and the epilogue after the close
/// delimiter are discarded. A missing close delimiter is tolerated: the last
/// part runs to the end of the body.
///
/// # Errors
///
/// Returns [`Error::MissingBoundary`] for an empty boundary and
/// [`Error::InvalidMultipart`] if no delimiter line is found.
pub fn split(body: &[u8], boundary: &str) -> Result<Vec<Part>> {
    if boundary.is_empty() {
        return Err(Error::MissingBoundary);
    }

    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();

    let mut parts = Vec::new();
    let mut current: Option<usize> = None;
    let mut seen_delimiter = false;
    let mut offset = 0;

    for line in body.split_inclusive(|&b| b == b'\n') {
        let line_start = offset;
        offset += line.len();

        let Some(rest) = trim_line_end(line).strip_prefix(delimiter) else {
            continue;
        };

        let is_close = rest.starts_with(b"--");
        // A longer boundary that merely shares our prefix
        if !is_close && !rest.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        seen_delimiter = true;
        if let Some(start) = current.take() {
            parts.push(Part::parse(strip_one_newline(&body[start..line_start])));
        }
        if is_close {
            return Ok(parts);
        }
        current = Some(offset);
    }

    if let Some(start) = current {
        parts.push(Part::parse(&body[start..]));
    }

    if seen_delimiter {
        Ok(parts)
    } else {
        Err(Error::InvalidMultipart(format!(
            "no delimiter for boundary {boundary:?}"
        )))
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// The line break before a delimiter belongs to the delimiter.
fn strip_one_newline(part: &[u8]) -> &[u8] {
    part.strip_suffix(b"\r\n")
        .or_else(|| part.strip_suffix(b"\n"))
        .unwrap_or(part)
}
