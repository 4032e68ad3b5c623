//! Messages and body parts.

use crate::content_type::ContentType;
use crate::encoding::{decode_base64, decode_charset, decode_quoted_printable};
use crate::error::Result;
use crate::header::Headers;
use std::fmt;

/// `Content-Transfer-Encoding` of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferEncoding {
    /// `7bit`, also used for missing or unrecognised values.
    #[default]
    SevenBit,
    /// `8bit`.
    EightBit,
    /// `base64`.
    Base64,
    /// `quoted-printable`.
    QuotedPrintable,
    /// `binary`.
    Binary,
}

impl TransferEncoding {
    const ALL: [Self; 5] = [
        Self::SevenBit,
        Self::EightBit,
        Self::Base64,
        Self::QuotedPrintable,
        Self::Binary,
    ];

    /// Reads a header value. Unknown tokens fall back to `7bit`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.as_str().eq_ignore_ascii_case(token))
            .unwrap_or_default()
    }

    /// The header token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SevenBit => "7bit",
            Self::EightBit => "8bit",
            Self::Base64 => "base64",
            Self::QuotedPrintable => "quoted-printable",
            Self::Binary => "binary",
        }
    }

    /// Undoes this encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid for the encoding.
    pub fn decode(self, body: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Base64 => decode_base64(body),
            Self::QuotedPrintable => decode_quoted_printable(body),
            Self::SevenBit | Self::EightBit | Self::Binary => Ok(body.to_vec()),
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MIME entity: a body part of a multipart message.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Part body (raw, still transfer-encoded).
    pub body: Vec<u8>,
}

impl Part {
    /// Creates a new part.
    #[must_use]
    pub const fn new(headers: Headers, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    /// Parses a part from its raw bytes (headers, blank line, body).
    #[must_use]
    pub fn parse(raw: &[u8]) -> Self {
        let (headers, body) = split_head(raw);
        Self::new(headers, body.to_vec())
    }

    /// Gets the content type, defaulting to `text/plain` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if content type header is invalid.
    pub fn content_type(&self) -> Result<ContentType> {
        self.headers
            .get("content-type")
            .map_or_else(|| Ok(ContentType::text_plain()), ContentType::parse)
    }

    /// Gets the transfer encoding.
    #[must_use]
    pub fn transfer_encoding(&self) -> TransferEncoding {
        self.headers
            .get("content-transfer-encoding")
            .map(TransferEncoding::parse)
            .unwrap_or_default()
    }

    /// Body bytes with the transfer encoding removed.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails.
    pub fn decode_body(&self) -> Result<Vec<u8>> {
        self.transfer_encoding().decode(&self.body)
    }

    /// Gets the decoded body as text in its declared charset.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type or transfer encoding is invalid.
    pub fn body_text(&self) -> Result<String> {
        let content_type = self.content_type()?;
        let decoded = self.decode_body()?;
        Ok(decode_charset(&decoded, content_type.charset()))
    }
}

/// A complete RFC 822 message: top-level headers plus the undecoded body.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message headers.
    pub headers: Headers,
    /// Raw body bytes (possibly multipart, still transfer-encoded).
    pub body: Vec<u8>,
}

impl Message {
    /// Parses a raw message.
    ///
    /// Input without a header/body separator is treated as headers only.
    #[must_use]
    pub fn parse(raw: &[u8]) -> Self {
        let (headers, body) = split_head(raw);
        Self {
            headers,
            body: body.to_vec(),
        }
    }

    /// Gets the content type, defaulting to `text/plain` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if content type header is invalid.
    pub fn content_type(&self) -> Result<ContentType> {
        self.headers
            .get("content-type")
            .map_or_else(|| Ok(ContentType::text_plain()), ContentType::parse)
    }

    /// True for `multipart/*` bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if the `Content-Type` header is malformed.
    pub fn is_multipart(&self) -> Result<bool> {
        Ok(self.content_type()?.is_multipart())
    }

    /// Gets the Subject header with encoded words decoded.
    #[must_use]
    pub fn subject(&self) -> Option<String> {
        self.headers.get_decoded("subject")
    }

    /// Gets the raw Date header.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.headers.get("date")
    }

    /// Body text of a single-part message.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type or transfer encoding is invalid.
    pub fn body_text(&self) -> Result<String> {
        Part::new(self.headers.clone(), self.body.clone()).body_text()
    }
}

/// Splits raw entity bytes into parsed headers and the body slice.
fn split_head(raw: &[u8]) -> (Headers, &[u8]) {
    // An entity that starts with a blank line has no headers.
    if let Some(body) = raw.strip_prefix(b"\r\n").or_else(|| raw.strip_prefix(b"\n")) {
        return (Headers::new(), body);
    }

    let separator = find(raw, b"\r\n\r\n")
        .map(|i| (i, 4))
        .into_iter()
        .chain(find(raw, b"\n\n").map(|i| (i, 2)))
        .min_by_key(|(i, _)| *i);

    let (head, body) = match separator {
        Some((i, len)) => (&raw[..i], &raw[i + len..]),
        None => (raw, &[][..]),
    };

    (Headers::parse(&String::from_utf8_lossy(head)), body)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
